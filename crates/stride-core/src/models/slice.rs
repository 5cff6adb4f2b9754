//! Slices and the daily plan they make up.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Goal, PlanMode, SliceLabel, SliceOutcome, Task, WorkKind, WorkUnit};

/// A bounded piece of one work unit's remaining effort, planned for a day.
///
/// Slices are derived values. Parent titles are a snapshot taken when the
/// slice is built and are recomputed from current state whenever a stored
/// plan is read back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slice {
    pub work_unit_id: u64,
    pub work_unit_title: String,
    pub kind: WorkKind,
    pub task_id: u64,
    pub task_title: String,
    pub goal_id: u64,
    pub goal_title: String,
    pub minutes: u32,
    pub label: SliceLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_action: Option<String>,
    #[serde(default)]
    pub outcome: SliceOutcome,
}

impl Slice {
    /// Build a pending slice of `minutes` for a work unit and its parents.
    pub fn new(work_unit: &WorkUnit, task: &Task, goal: &Goal, minutes: u32) -> Self {
        Self {
            work_unit_id: work_unit.id,
            work_unit_title: work_unit.title.clone(),
            kind: work_unit.kind,
            task_id: task.id,
            task_title: task.title.clone(),
            goal_id: goal.id,
            goal_title: goal.title.clone(),
            minutes,
            label: SliceLabel::from_minutes(minutes),
            first_action: work_unit.first_action.clone(),
            outcome: SliceOutcome::Pending,
        }
    }
}

/// The ordered set of slices chosen for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPlan {
    pub date: Date,
    pub mode: PlanMode,
    pub slices: Vec<Slice>,
    pub total_minutes: u32,
    pub capacity_minutes: u32,
}

impl DailyPlan {
    /// An empty plan for a date.
    pub fn empty(date: Date, mode: PlanMode, capacity_minutes: u32) -> Self {
        Self {
            date,
            mode,
            slices: Vec::new(),
            total_minutes: 0,
            capacity_minutes,
        }
    }

    /// Append a slice, keeping `total_minutes` in step.
    pub fn push(&mut self, slice: Slice) {
        self.total_minutes += slice.minutes;
        self.slices.push(slice);
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn contains_work_unit(&self, work_unit_id: u64) -> bool {
        self.slices.iter().any(|s| s.work_unit_id == work_unit_id)
    }

    pub fn contains_task(&self, task_id: u64) -> bool {
        self.slices.iter().any(|s| s.task_id == task_id)
    }

    /// Minutes of capacity not yet claimed by slices.
    pub fn unused_minutes(&self) -> u32 {
        self.capacity_minutes.saturating_sub(self.total_minutes)
    }
}

/// Bookkeeping returned alongside a generated plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanMetadata {
    /// Eligible work units considered
    pub candidate_count: usize,
    /// Slices that made it into the plan
    pub selected_count: usize,
    pub capacity_minutes: u32,
    pub used_minutes: u32,
    /// Short neutral status line
    pub message: String,
}

/// A plan together with the metadata describing how it was built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedPlan {
    pub plan: DailyPlan,
    pub metadata: PlanMetadata,
}
