//! Data models for goals, work, and daily plans.
//!
//! This module contains the domain models of the Stride planner. Display
//! implementations live in [`crate::display::models`] so that data structures
//! stay separate from presentation.
//!
//! # Hierarchy
//!
//! ```text
//! Goal ──┬── Task ──┬── WorkUnit      (persisted entities)
//!        │          └── WorkUnit
//!        └── Task ───── WorkUnit
//!
//! DailyAllocation ── AllocatedSlice ─▶ WorkUnit id   (persisted per date)
//! DailyPlan ──────── Slice            (derived, never stored as-is)
//! ```
//!
//! A [`Slice`] is always rebuilt from current entity state, so titles shown
//! for a stored plan follow renames and deletions.
//!
//! # Examples
//!
//! ```rust
//! use stride_core::models::{Goal, GoalStatus, Task, WorkKind, WorkUnit, Slice, SliceLabel};
//! use jiff::Timestamp;
//!
//! let now = Timestamp::now();
//! let goal = Goal {
//!     id: 1,
//!     title: "Learn Rust".to_string(),
//!     status: GoalStatus::Active,
//!     target_date: None,
//!     lifelong: false,
//!     created_at: now,
//!     updated_at: now,
//!     tasks: vec![],
//! };
//! let task = Task {
//!     id: 2,
//!     goal_id: 1,
//!     title: "Ownership".to_string(),
//!     estimated_total_minutes: 120,
//!     completed_minutes: 0,
//!     order: 0,
//!     created_at: now,
//!     updated_at: now,
//!     work_units: vec![],
//! };
//! let unit = WorkUnit {
//!     id: 3,
//!     task_id: 2,
//!     title: "Read chapter 4".to_string(),
//!     kind: WorkKind::Study,
//!     estimated_total_minutes: 120,
//!     completed_minutes: 0,
//!     first_action: None,
//!     success_signal: None,
//!     created_at: now,
//!     updated_at: now,
//! };
//!
//! let slice = Slice::new(&unit, &task, &goal, 25);
//! assert_eq!(slice.label, SliceLabel::Medium);
//! ```

pub mod allocation;
pub mod feasibility;
pub mod filters;
pub mod goal;
pub mod slice;
pub mod status;
pub mod summary;


pub use allocation::{AllocatedSlice, AllocationUpdate, DailyAllocation};
pub use feasibility::{FeasibilityReport, TargetSuggestion};
pub use filters::GoalFilter;
pub use goal::{Goal, Task, WorkUnit};
pub use slice::{DailyPlan, GeneratedPlan, PlanMetadata, Slice};
pub use status::{GoalStatus, PlanMode, SliceLabel, SliceOutcome, WorkKind};
pub use summary::GoalSummary;
