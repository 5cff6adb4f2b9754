//! The daily planning and slice allocation engine.
//!
//! Every function here is synchronous and works against the collaborator
//! traits in [`crate::store`]; the async [`crate::Planner`] facade runs them
//! inside `spawn_blocking` against SQLite.
//!
//! ```text
//!  capacity ──┐
//!             ├──▶ assembler ──▶ DailyPlan ──▶ AllocationStore
//!  prioritizer┘        │
//!                   slicer
//! ```
//!
//! - [`capacity`]: sustainable minutes per day from recorded history
//! - [`prioritizer`]: ranks outstanding work units across active goals
//! - [`slicer`]: sizes one slice of a work unit for a mode
//! - [`assembler`]: greedy bounded selection, regeneration, extension
//! - [`outcomes`]: completing and skipping slices
//! - [`feasibility`]: target-date projection and suggestion
//!
//! Randomness (score jitter and slice sizing) always comes from a caller
//! supplied [`rand::Rng`], so a seeded generator makes results reproducible.

pub mod assembler;
pub mod capacity;
pub mod feasibility;
pub mod outcomes;
pub mod prioritizer;
pub mod slicer;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};

pub use assembler::{add_more_slices, generate_daily_plan, load_daily_plan, regenerate_daily_plan};
pub use capacity::estimate_daily_capacity;
pub use feasibility::{assess_feasibility, suggest_target_date};
pub use outcomes::{complete_slice, skip_slice, SliceResult};
pub use prioritizer::{prioritize_work_units, Candidate};
pub use slicer::generate_slice;

/// Score bonus applied when a goal's target date is within `within_days`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrgencyTier {
    pub within_days: i32,
    pub bonus: u32,
}

/// Tunable constants of the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Lower bound of the estimated capacity band
    pub min_capacity: u32,
    /// Upper bound of the estimated capacity band
    pub max_capacity: u32,
    /// Capacity used until enough history exists
    pub default_capacity: u32,
    /// Days with recorded outcomes needed before history is trusted
    pub min_capacity_samples: usize,
    /// Maximum slices in one day's plan
    pub cognitive_limit: usize,
    pub base_score: u32,
    /// Upper bound (inclusive) of the random score jitter
    pub max_jitter: u32,
    /// Checked in order; the first matching tier wins
    pub urgency_tiers: Vec<UrgencyTier>,
    /// Floor on per-goal daily minutes when suggesting target dates
    pub min_goal_daily_minutes: u32,
    /// Schedule slack applied to suggested dates for infeasible targets
    pub feasibility_buffer: f64,
    /// Slack applied when suggesting a date for a new goal
    pub suggestion_buffer: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_capacity: 60,
            max_capacity: 300,
            default_capacity: 60,
            min_capacity_samples: 3,
            cognitive_limit: 5,
            base_score: 50,
            max_jitter: 10,
            urgency_tiers: vec![
                UrgencyTier {
                    within_days: 7,
                    bonus: 30,
                },
                UrgencyTier {
                    within_days: 14,
                    bonus: 20,
                },
                UrgencyTier {
                    within_days: 30,
                    bonus: 10,
                },
            ],
            min_goal_daily_minutes: 20,
            feasibility_buffer: 1.1,
            suggestion_buffer: 1.25,
        }
    }
}
