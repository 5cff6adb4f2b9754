use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PLAN_DATE: &str = "2030-01-15";

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output, a fixed seed and the given database
fn stride_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("stride").expect("Failed to find stride binary");
    cmd.arg("--no-color")
        .arg("--seed")
        .arg("42")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Goal 1 with task 1 holding a 30 minute work unit 1.
fn seed_goal(temp_dir: &TempDir) {
    stride_cmd(temp_dir)
        .args([
            "goal",
            "create",
            "Learn Rust",
            "--target-date",
            "2099-12-31",
        ])
        .assert()
        .success();
    stride_cmd(temp_dir)
        .args(["task", "add", "1", "Read the book"])
        .assert()
        .success();
    stride_cmd(temp_dir)
        .args([
            "unit",
            "add",
            "1",
            "Chapter 4",
            "--minutes",
            "30",
            "--kind",
            "study",
            "--first-action",
            "Open the ownership chapter",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_create_goal_success() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args([
            "goal",
            "create",
            "Run a marathon",
            "--target-date",
            "2099-06-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created goal with ID: 1"))
        .stdout(predicate::str::contains("# 1. Run a marathon"))
        .stdout(predicate::str::contains("- Target: 2099-06-01"));
}

#[test]
fn test_cli_create_lifelong_goal() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["goal", "create", "Stay fit", "--lifelong"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Target: lifelong"));
}

#[test]
fn test_cli_create_goal_rejects_bad_date() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["goal", "create", "Broken", "--target-date", "next week"])
        .assert()
        .failure();
}

#[test]
fn test_cli_list_empty_goals() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# No active goals found"));
}

#[test]
fn test_cli_list_goals_by_status() {
    let temp_dir = create_cli_test_environment();
    seed_goal(&temp_dir);

    stride_cmd(&temp_dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Active Goals"))
        .stdout(predicate::str::contains("Learn Rust (ID: 1)"));

    stride_cmd(&temp_dir)
        .args(["goal", "update", "1", "--status", "paused"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated goal with ID: 1"));

    stride_cmd(&temp_dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# No active goals found"));

    stride_cmd(&temp_dir)
        .args(["goal", "list", "--status", "paused"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Paused Goals"))
        .stdout(predicate::str::contains("Learn Rust"));

    stride_cmd(&temp_dir)
        .args(["goal", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# All Goals"));
}

#[test]
fn test_cli_show_goal_with_tasks() {
    let temp_dir = create_cli_test_environment();
    seed_goal(&temp_dir);

    stride_cmd(&temp_dir)
        .args(["goal", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Tasks"))
        .stdout(predicate::str::contains("### 1. Read the book (0/30 min)"))
        .stdout(predicate::str::contains("Chapter 4 (study, 0/30 min)"))
        .stdout(predicate::str::contains(
            "First action: Open the ownership chapter",
        ));
}

#[test]
fn test_cli_show_missing_goal_fails() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["goal", "show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Goal with ID 999 not found"));
}

#[test]
fn test_cli_delete_goal_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    seed_goal(&temp_dir);

    stride_cmd(&temp_dir)
        .args(["goal", "delete", "1"])
        .assert()
        .failure();

    stride_cmd(&temp_dir)
        .args(["goal", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted goal 'Learn Rust' (ID: 1) with 1 tasks and 1 work units",
        ));

    stride_cmd(&temp_dir)
        .args(["goal", "show", "1"])
        .assert()
        .failure();
}

#[test]
fn test_cli_add_task_to_missing_goal_fails() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["task", "add", "7", "Orphan"])
        .assert()
        .failure();
}

#[test]
fn test_cli_work_unit_validation() {
    let temp_dir = create_cli_test_environment();
    seed_goal(&temp_dir);

    stride_cmd(&temp_dir)
        .args(["unit", "add", "1", "Too long", "--minutes", "601"])
        .assert()
        .failure();

    stride_cmd(&temp_dir)
        .args(["unit", "add", "1", "Nothing", "--minutes", "0"])
        .assert()
        .failure();

    stride_cmd(&temp_dir)
        .args(["unit", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 4"));
}

#[test]
fn test_cli_plan_without_goals() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["plan", "generate", "--date", PLAN_DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks available right now."))
        .stdout(predicate::str::contains("Nothing planned for this day."));
}

#[test]
fn test_cli_show_plan_before_generating() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["plan", "show", "--date", PLAN_DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "No plan stored for {PLAN_DATE}"
        )));
}

#[test]
fn test_cli_daily_workflow() {
    let temp_dir = create_cli_test_environment();
    seed_goal(&temp_dir);

    stride_cmd(&temp_dir)
        .args(["plan", "generate", "--date", PLAN_DATE, "--mode", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("# Plan for {PLAN_DATE}")))
        .stdout(predicate::str::contains("- Mode: light"))
        .stdout(predicate::str::contains("Chapter 4"))
        .stdout(predicate::str::contains("- Start by: Open the ownership chapter"));

    stride_cmd(&temp_dir)
        .args(["plan", "show", "--date", PLAN_DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("○ Open"));

    stride_cmd(&temp_dir)
        .args(["slice", "complete", "1", "--date", PLAN_DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Done"))
        .stdout(predicate::str::contains("of 'Chapter 4'"));

    // A slice can only be closed once
    stride_cmd(&temp_dir)
        .args(["slice", "skip", "1", "--date", PLAN_DATE])
        .assert()
        .failure();

    stride_cmd(&temp_dir)
        .args(["today", "--date", PLAN_DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Done"));
}

#[test]
fn test_cli_slice_not_in_plan_fails() {
    let temp_dir = create_cli_test_environment();
    seed_goal(&temp_dir);

    stride_cmd(&temp_dir)
        .args(["slice", "complete", "1", "--date", PLAN_DATE])
        .assert()
        .failure();
}

#[test]
fn test_cli_feasibility() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["feasibility", "check", "600", "--target-date", "2099-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Feasible"))
        .stdout(predicate::str::contains("- Capacity per day: 60 min"));

    stride_cmd(&temp_dir)
        .args(["feasibility", "suggest", "600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Suggested target:"))
        .stdout(predicate::str::contains("- Days needed:"));
}

#[test]
fn test_cli_capacity_default() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .arg("capacity")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Estimated capacity: 60 minutes per day",
        ));
}

#[test]
fn test_cli_default_command_shows_today() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plan for"));
}

#[test]
fn test_cli_help_and_version() {
    Command::cargo_bin("stride")
        .expect("Failed to find stride binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("daily planner"));

    Command::cargo_bin("stride")
        .expect("Failed to find stride binary")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stride"));
}

#[test]
fn test_cli_invalid_id_argument() {
    let temp_dir = create_cli_test_environment();

    stride_cmd(&temp_dir)
        .args(["goal", "show", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
