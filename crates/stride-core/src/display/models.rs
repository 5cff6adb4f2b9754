//! Display implementations for domain models.
//!
//! Every implementation writes markdown so the same text renders in the
//! terminal and reads cleanly when returned over MCP.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    engine::SliceResult,
    models::{
        DailyPlan, FeasibilityReport, GeneratedPlan, Goal, GoalStatus, GoalSummary, PlanMode,
        Slice, SliceLabel, SliceOutcome, TargetSuggestion, Task, WorkKind, WorkUnit,
    },
};

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for WorkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SliceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        match (&self.target_date, self.lifelong) {
            (_, true) => writeln!(f, "- Target: lifelong")?,
            (Some(date), false) => writeln!(f, "- Target: {date}")?,
            (None, false) => {}
        }
        writeln!(
            f,
            "- Progress: {}/{} min",
            self.completed_minutes(),
            self.estimated_total_minutes()
        )?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this goal.")?;
            return Ok(());
        }

        writeln!(f, "\n## Tasks")?;
        writeln!(f)?;
        for task in &self.tasks {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let done = if self.is_done() && self.estimated_total_minutes > 0 {
            " ✓"
        } else {
            ""
        };
        writeln!(
            f,
            "### {}. {} ({}/{} min){done}",
            self.id, self.title, self.completed_minutes, self.estimated_total_minutes
        )?;
        writeln!(f)?;

        for unit in &self.work_units {
            write!(f, "{unit}")?;
        }
        if !self.work_units.is_empty() {
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for WorkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_complete() { "x" } else { " " };
        writeln!(
            f,
            "- [{mark}] {}. {} ({}, {}/{} min)",
            self.id, self.title, self.kind, self.completed_minutes, self.estimated_total_minutes
        )?;
        if let Some(action) = &self.first_action {
            writeln!(f, "  - First action: {action}")?;
        }
        if let Some(signal) = &self.success_signal {
            writeln!(f, "  - Done when: {signal}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} min · {} ({})",
            self.minutes,
            self.work_unit_title,
            self.outcome.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Work unit: {} ({})", self.work_unit_id, self.kind)?;
        writeln!(f, "- Task: {}", self.task_title)?;
        writeln!(f, "- Goal: {}", self.goal_title)?;
        writeln!(f, "- Size: {}", self.label)?;
        if let Some(action) = &self.first_action {
            writeln!(f, "- Start by: {action}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for DailyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan for {}", self.date)?;
        writeln!(f)?;
        writeln!(f, "- Mode: {}", self.mode)?;
        writeln!(
            f,
            "- Load: {}/{} min",
            self.total_minutes, self.capacity_minutes
        )?;

        if self.slices.is_empty() {
            writeln!(f, "\nNothing planned for this day.")?;
            return Ok(());
        }

        writeln!(f, "\n## Slices")?;
        writeln!(f)?;
        for slice in &self.slices {
            write!(f, "{slice}")?;
        }
        Ok(())
    }
}

impl fmt::Display for GeneratedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.metadata.message)?;
        writeln!(f)?;
        write!(f, "{}", self.plan)
    }
}

impl fmt::Display for FeasibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_feasible {
            "Feasible"
        } else {
            "Not feasible"
        };
        writeln!(f, "# {verdict}")?;
        writeln!(f)?;
        writeln!(f, "{}", self.message)?;
        writeln!(f)?;
        if let Some(target) = &self.target_date {
            writeln!(f, "- Target: {target}")?;
            writeln!(f, "- Needed per day: {} min", self.required_daily_minutes)?;
        }
        writeln!(f, "- Capacity per day: {} min", self.available_capacity)?;
        if let Some(suggested) = &self.suggested_date {
            writeln!(f, "- Suggested date: {suggested}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TargetSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Suggested target: {}", self.suggested_date)?;
        writeln!(f)?;
        writeln!(f, "- Goals sharing capacity: {}", self.concurrent_goals)?;
        writeln!(f, "- Minutes per day: {}", self.daily_allocation)?;
        writeln!(f, "- Days needed: {}", self.days_needed)
    }
}

impl fmt::Display for GoalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) {}%",
            self.title,
            self.id,
            self.percent_complete()
        )?;
        writeln!(f)?;

        writeln!(f, "- **Status**: {}", self.status)?;
        if self.lifelong {
            writeln!(f, "- **Target**: lifelong")?;
        } else if let Some(date) = &self.target_date {
            writeln!(f, "- **Target**: {date}")?;
        }
        writeln!(
            f,
            "- **Work**: {} tasks, {}/{} min",
            self.task_count, self.completed_minutes, self.total_minutes
        )?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for SliceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} min of '{}' on {}",
            self.outcome.with_icon(),
            self.minutes,
            self.work_unit.title,
            self.date
        )?;
        writeln!(
            f,
            "- Work unit progress: {}/{} min",
            self.work_unit.completed_minutes, self.work_unit.estimated_total_minutes
        )?;
        if self.goal_completed {
            writeln!(f, "- Goal completed")?;
        }
        if self.goal_reset {
            writeln!(f, "- Lifelong goal finished a cycle and was reset")?;
        }
        Ok(())
    }
}
