mod common;

use std::path::PathBuf;

use stride_core::{
    params::{
        AddMoreSlices, AddTask, AddWorkUnit, CreateGoal, GeneratePlan, Id, ListGoals, ShowPlan,
        SliceRef, UpdateGoal,
    },
    EngineConfig, GoalStatus, PlanMode, PlannerBuilder, PlannerError, SliceOutcome,
};
use tempfile::TempDir;

use crate::common::create_test_planner;

/// Helper function to create a temporary directory and database path
fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test_stride.db");
    (temp_dir, db_path)
}

fn on(date: &str) -> GeneratePlan {
    GeneratePlan {
        date: Some(date.to_string()),
        mode: None,
    }
}

fn slice_on(date: &str, work_unit_id: u64) -> SliceRef {
    SliceRef {
        date: Some(date.to_string()),
        work_unit_id,
    }
}

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_goal_workflow() {
    let (_temp_dir, planner) = create_test_planner().await;

    let goal = planner
        .create_goal(&CreateGoal {
            title: "Learn Italian".to_string(),
            target_date: Some("2031-06-01".to_string()),
            lifelong: false,
        })
        .await
        .expect("Failed to create goal");

    let mut unit_ids = Vec::new();
    for task_title in ["Grammar", "Vocabulary"] {
        let task = planner
            .add_task(&AddTask {
                goal_id: goal.id,
                title: task_title.to_string(),
            })
            .await
            .expect("Failed to add task");
        let unit = planner
            .add_work_unit(&AddWorkUnit {
                task_id: task.id,
                title: format!("{task_title} drills"),
                kind: Some("practice".to_string()),
                estimated_minutes: 120,
                first_action: Some("Open the workbook".to_string()),
                success_signal: None,
            })
            .await
            .expect("Failed to add work unit");
        unit_ids.push(unit.id);
    }

    // Two tasks, so at most one slice from each; light slices both fit
    let generated = planner
        .generate_daily_plan(&GeneratePlan {
            date: Some("2031-01-05".to_string()),
            mode: Some("light".to_string()),
        })
        .await
        .expect("Failed to generate plan");
    assert_eq!(generated.plan.len(), 2);
    assert_eq!(generated.plan.mode, PlanMode::Light);
    assert!(generated.plan.total_minutes <= generated.plan.capacity_minutes);
    for slice in &generated.plan.slices {
        assert!(unit_ids.contains(&slice.work_unit_id));
        assert_eq!(slice.goal_title, "Learn Italian");
        assert_eq!(slice.first_action.as_deref(), Some("Open the workbook"));
    }

    let first = &generated.plan.slices[0];
    let done = planner
        .complete_slice(&slice_on("2031-01-05", first.work_unit_id))
        .await
        .expect("Failed to complete slice");
    assert_eq!(done.minutes, first.minutes);
    assert_eq!(done.work_unit.completed_minutes, first.minutes);
    assert!(!done.goal_completed);

    // A slice can only be closed once
    let err = planner
        .skip_slice(&slice_on("2031-01-05", first.work_unit_id))
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));

    let second = &generated.plan.slices[1];
    let skipped = planner
        .skip_slice(&slice_on("2031-01-05", second.work_unit_id))
        .await
        .expect("Failed to skip slice");
    assert_eq!(skipped.outcome, SliceOutcome::Skipped);
    assert_eq!(skipped.work_unit.completed_minutes, 0);

    let stored = planner
        .daily_plan(&ShowPlan {
            date: Some("2031-01-05".to_string()),
        })
        .await
        .expect("Failed to load plan")
        .expect("Plan should be stored");
    assert_eq!(stored.slices[0].outcome, SliceOutcome::Completed);
    assert_eq!(stored.slices[1].outcome, SliceOutcome::Skipped);

    let summaries = planner
        .list_goals(&ListGoals::default())
        .await
        .expect("Failed to list goals");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_minutes, 240);
    assert_eq!(summaries[0].completed_minutes, first.minutes);
}

#[tokio::test]
async fn test_lifelong_goal_resets_instead_of_completing() {
    let (_temp_dir, planner) = create_test_planner().await;

    let goal = planner
        .create_goal(&CreateGoal {
            title: "Stay fit".to_string(),
            target_date: None,
            lifelong: true,
        })
        .await
        .unwrap();
    let task = planner
        .add_task(&AddTask {
            goal_id: goal.id,
            title: "Stretching".to_string(),
        })
        .await
        .unwrap();
    let unit = planner
        .add_work_unit(&AddWorkUnit {
            task_id: task.id,
            title: "Morning routine".to_string(),
            estimated_minutes: 15,
            ..Default::default()
        })
        .await
        .unwrap();

    planner.generate_daily_plan(&on("2031-02-01")).await.unwrap();
    let result = planner
        .complete_slice(&slice_on("2031-02-01", unit.id))
        .await
        .unwrap();
    assert!(result.goal_reset);
    assert!(!result.goal_completed);

    let goal = planner.get_goal(&Id { id: goal.id }).await.unwrap().unwrap();
    assert_eq!(goal.status, GoalStatus::Active);
    assert_eq!(goal.completed_minutes(), 0);

    // The reset goal is plannable again the next day
    let next = planner.generate_daily_plan(&on("2031-02-02")).await.unwrap();
    assert_eq!(next.plan.len(), 1);
}

#[tokio::test]
async fn test_paused_goals_are_not_planned() {
    let (_temp_dir, planner) = create_test_planner().await;
    let goal = planner
        .create_goal(&CreateGoal {
            title: "On hold".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let task = planner
        .add_task(&AddTask {
            goal_id: goal.id,
            title: "Task".to_string(),
        })
        .await
        .unwrap();
    planner
        .add_work_unit(&AddWorkUnit {
            task_id: task.id,
            title: "Unit".to_string(),
            estimated_minutes: 60,
            ..Default::default()
        })
        .await
        .unwrap();
    planner
        .update_goal(&UpdateGoal {
            id: goal.id,
            status: Some("paused".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let generated = planner.generate_daily_plan(&on("2031-03-01")).await.unwrap();
    assert!(generated.plan.is_empty());
    assert_eq!(generated.metadata.candidate_count, 0);

    // Empty plans are still stored
    let stored = planner
        .daily_plan(&ShowPlan {
            date: Some("2031-03-01".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(stored.map(|p| p.len()), Some(0));
}

#[tokio::test]
async fn test_regenerate_replaces_stored_plan() {
    let (_temp_dir, planner) = create_test_planner().await;
    let goal = planner
        .create_goal(&CreateGoal {
            title: "Redo".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let task = planner
        .add_task(&AddTask {
            goal_id: goal.id,
            title: "Task".to_string(),
        })
        .await
        .unwrap();
    planner
        .add_work_unit(&AddWorkUnit {
            task_id: task.id,
            title: "Unit".to_string(),
            estimated_minutes: 300,
            ..Default::default()
        })
        .await
        .unwrap();

    planner.generate_daily_plan(&on("2031-04-01")).await.unwrap();
    let light = planner
        .regenerate_daily_plan(&GeneratePlan {
            date: Some("2031-04-01".to_string()),
            mode: Some("light".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(light.plan.mode, PlanMode::Light);
    assert!((10..=20).contains(&light.plan.total_minutes));

    let stored = planner
        .daily_plan(&ShowPlan {
            date: Some("2031-04-01".to_string()),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, light.plan);
}

#[tokio::test]
async fn test_add_more_without_stored_plan() {
    let (_temp_dir, planner) = create_test_planner().await;
    let goal = planner
        .create_goal(&CreateGoal {
            title: "Extra".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let task = planner
        .add_task(&AddTask {
            goal_id: goal.id,
            title: "Task".to_string(),
        })
        .await
        .unwrap();
    planner
        .add_work_unit(&AddWorkUnit {
            task_id: task.id,
            title: "Unit".to_string(),
            estimated_minutes: 90,
            ..Default::default()
        })
        .await
        .unwrap();

    let plan = planner
        .add_more_slices(&AddMoreSlices {
            date: Some("2031-05-01".to_string()),
            extra_minutes: 30,
            mode: Some("light".to_string()),
        })
        .await
        .expect("Failed to add slices");
    assert_eq!(plan.capacity_minutes, 30);
    assert_eq!(plan.len(), 1);
    assert!(plan.total_minutes <= 30);

    let stored = planner
        .daily_plan(&ShowPlan {
            date: Some("2031-05-01".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(stored, Some(plan));
}

#[tokio::test]
async fn test_capacity_follows_history() {
    let (_temp_dir, db_path) = create_test_environment();
    let planner = PlannerBuilder::new()
        .with_database_path(Some(db_path))
        .with_engine_config(EngineConfig {
            min_capacity: 10,
            ..Default::default()
        })
        .with_seed(Some(11))
        .build()
        .await
        .expect("Failed to create planner");

    assert_eq!(planner.estimate_capacity().await.unwrap(), 60);

    let goal = planner
        .create_goal(&CreateGoal {
            title: "History".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let task = planner
        .add_task(&AddTask {
            goal_id: goal.id,
            title: "Task".to_string(),
        })
        .await
        .unwrap();
    planner
        .add_work_unit(&AddWorkUnit {
            task_id: task.id,
            title: "Long unit".to_string(),
            estimated_minutes: 600,
            ..Default::default()
        })
        .await
        .unwrap();

    let mut totals = Vec::new();
    for day in ["2031-06-01", "2031-06-02", "2031-06-03"] {
        let generated = planner.generate_daily_plan(&on(day)).await.unwrap();
        let slice = &generated.plan.slices[0];
        planner
            .complete_slice(&slice_on(day, slice.work_unit_id))
            .await
            .unwrap();
        totals.push(generated.plan.total_minutes);
    }

    let mean = f64::from(totals.iter().sum::<u32>()) / 3.0;
    assert_eq!(
        planner.estimate_capacity().await.unwrap(),
        mean.round() as u32
    );
}

#[tokio::test]
async fn test_invalid_parameters_are_rejected() {
    let (_temp_dir, planner) = create_test_planner().await;

    let err = planner
        .create_goal(&CreateGoal {
            title: "   ".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));

    let err = planner
        .generate_daily_plan(&GeneratePlan {
            date: Some("2031-13-40".to_string()),
            mode: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));

    let err = planner
        .generate_daily_plan(&GeneratePlan {
            date: None,
            mode: Some("sprint".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));

    let err = planner
        .add_task(&AddTask {
            goal_id: 4040,
            title: "Orphan".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::GoalNotFound { id: 4040 }));
}
