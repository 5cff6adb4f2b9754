//! Goal summary types and functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Goal, GoalStatus};

/// Summary information about a goal with minute totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSummary {
    /// Goal ID
    pub id: u64,
    /// Title of the goal
    pub title: String,
    /// Goal status
    pub status: GoalStatus,
    /// Optional target date
    pub target_date: Option<Date>,
    /// Whether the goal resets instead of completing
    pub lifelong: bool,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Number of tasks
    pub task_count: u32,
    /// Estimated minutes across all tasks
    pub total_minutes: u32,
    /// Minutes completed across all tasks
    pub completed_minutes: u32,
}

impl GoalSummary {
    /// Percentage of estimated minutes completed, rounded down.
    pub fn percent_complete(&self) -> u32 {
        if self.total_minutes == 0 {
            0
        } else {
            (u64::from(self.completed_minutes) * 100 / u64::from(self.total_minutes)) as u32
        }
    }
}

impl From<&Goal> for GoalSummary {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id,
            title: goal.title.clone(),
            status: goal.status,
            target_date: goal.target_date,
            lifelong: goal.lifelong,
            created_at: goal.created_at,
            task_count: goal.tasks.len() as u32,
            total_minutes: goal.estimated_total_minutes(),
            completed_minutes: goal.completed_minutes(),
        }
    }
}
