//! Collaborator interfaces consumed by the planning engine.
//!
//! The engine never talks to SQLite directly. It reads a snapshot of the
//! goal hierarchy through [`WorkRepository`] and reads/writes per-date
//! allocation records through [`AllocationStore`]. [`crate::db::Database`]
//! implements both; tests substitute in-memory fakes.
//!
//! Reads are best-effort snapshots. The engine does not wrap its
//! read-compute-write sequence in a transaction.

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{AllocationUpdate, DailyAllocation, Goal, Task, WorkUnit},
};

/// Flat view of every non-deleted goal, task, and work unit.
///
/// Goals and tasks in a snapshot do not carry nested children; parents are
/// resolved by id.
#[derive(Debug, Clone, Default)]
pub struct WorkSnapshot {
    pub goals: Vec<Goal>,
    pub tasks: Vec<Task>,
    pub work_units: Vec<WorkUnit>,
}

/// Read and progress access to goals, tasks, and work units.
pub trait WorkRepository {
    /// Load the current goal hierarchy.
    fn snapshot(&self) -> Result<WorkSnapshot>;

    fn work_unit(&self, id: u64) -> Result<Option<WorkUnit>>;

    fn task(&self, id: u64) -> Result<Option<Task>>;

    /// Fetch a goal with its tasks and their work units loaded.
    fn goal_with_tasks(&self, id: u64) -> Result<Option<Goal>>;

    /// Add `minutes` of progress to a work unit and its task, each clamped
    /// to its estimate. Returns the updated work unit.
    fn record_progress(&mut self, work_unit_id: u64, minutes: u32) -> Result<WorkUnit>;

    /// Mark a goal completed.
    fn complete_goal(&mut self, goal_id: u64) -> Result<()>;

    /// Zero the progress of every task and work unit under a goal.
    fn reset_goal_progress(&mut self, goal_id: u64) -> Result<()>;
}

/// One allocation record per calendar date.
pub trait AllocationStore {
    fn get_by_date(&self, date: Date) -> Result<Option<DailyAllocation>>;

    /// Store a record, replacing any record already held for its date.
    fn create(&mut self, record: &DailyAllocation) -> Result<()>;

    /// Apply a partial update. Returns `None` when no record exists.
    fn update(&mut self, date: Date, update: &AllocationUpdate) -> Result<Option<DailyAllocation>>;

    /// Remove the record for a date. Returns whether one existed.
    fn delete(&mut self, date: Date) -> Result<bool>;

    /// Every allocation with a recorded completion outcome.
    fn with_outcomes(&self) -> Result<Vec<DailyAllocation>>;
}
