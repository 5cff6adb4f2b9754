//! Goal, task, and work unit definitions.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{GoalStatus, WorkKind};

/// A top-level objective, optionally with a target date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique identifier for the goal
    pub id: u64,

    /// Title of the goal
    pub title: String,

    /// Lifecycle status (active, paused, completed)
    #[serde(default)]
    pub status: GoalStatus,

    /// Date the user would like to be done by
    pub target_date: Option<Date>,

    /// Lifelong goals never complete; their progress resets instead
    #[serde(default)]
    pub lifelong: bool,

    /// Timestamp when the goal was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the goal was last modified (UTC)
    pub updated_at: Timestamp,

    /// Milestones beneath this goal (loaded on demand)
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Goal {
    /// Sum of estimated minutes across loaded tasks.
    pub fn estimated_total_minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.estimated_total_minutes).sum()
    }

    /// Sum of completed minutes across loaded tasks.
    pub fn completed_minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.completed_minutes).sum()
    }

    /// Minutes still outstanding across loaded tasks.
    pub fn remaining_minutes(&self) -> u32 {
        self.tasks.iter().map(Task::remaining).sum()
    }
}

/// A milestone grouping related work units beneath a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,

    /// ID of the parent goal
    pub goal_id: u64,

    pub title: String,

    /// Total effort estimate; grows as work units are added
    pub estimated_total_minutes: u32,

    /// Effort already spent, never above the estimate
    pub completed_minutes: u32,

    /// Position of the task within its goal (0-indexed)
    pub order: u32,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,

    /// Work units beneath this task (loaded on demand)
    #[serde(default)]
    pub work_units: Vec<WorkUnit>,
}

impl Task {
    pub fn remaining(&self) -> u32 {
        self.estimated_total_minutes
            .saturating_sub(self.completed_minutes)
    }

    pub fn is_done(&self) -> bool {
        self.completed_minutes >= self.estimated_total_minutes
    }
}

/// The smallest actionable item, and the unit the scheduler allocates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkUnit {
    pub id: u64,

    /// ID of the parent task
    pub task_id: u64,

    pub title: String,

    pub kind: WorkKind,

    pub estimated_total_minutes: u32,

    pub completed_minutes: u32,

    /// A concrete first move, shown alongside the slice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_action: Option<String>,

    /// How to tell the work unit is finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_signal: Option<String>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl WorkUnit {
    /// Minutes left before the estimate is met.
    pub fn remaining(&self) -> u32 {
        self.estimated_total_minutes
            .saturating_sub(self.completed_minutes)
    }

    pub fn is_complete(&self) -> bool {
        self.completed_minutes >= self.estimated_total_minutes
    }
}
