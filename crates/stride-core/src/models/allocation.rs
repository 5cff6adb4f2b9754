//! Persisted daily allocation records.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{DailyPlan, PlanMode, SliceOutcome};

/// One entry of an allocation: an index into the work unit table plus the
/// minutes planned for it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocatedSlice {
    pub work_unit_id: u64,
    pub minutes: u32,
    #[serde(default)]
    pub outcome: SliceOutcome,
}

/// The stored record of which slices were chosen for a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyAllocation {
    pub date: Date,
    pub mode: PlanMode,
    pub slices: Vec<AllocatedSlice>,
    /// Estimated load: sum of planned minutes
    pub total_minutes: u32,
    /// Capacity the plan was built against
    pub capacity_minutes: u32,
    /// Minutes actually completed, once any outcome has been recorded
    pub completed_minutes: Option<u32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DailyAllocation {
    /// Capture a freshly generated plan as a pending allocation.
    pub fn from_plan(plan: &DailyPlan) -> Self {
        let now = Timestamp::now();
        Self {
            date: plan.date,
            mode: plan.mode,
            slices: plan
                .slices
                .iter()
                .map(|s| AllocatedSlice {
                    work_unit_id: s.work_unit_id,
                    minutes: s.minutes,
                    outcome: s.outcome,
                })
                .collect(),
            total_minutes: plan.total_minutes,
            capacity_minutes: plan.capacity_minutes,
            completed_minutes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the day has a recorded completion outcome and so counts as a
    /// capacity sample.
    pub fn has_outcome(&self) -> bool {
        self.completed_minutes.is_some()
    }

    pub fn slice(&self, work_unit_id: u64) -> Option<&AllocatedSlice> {
        self.slices.iter().find(|s| s.work_unit_id == work_unit_id)
    }

    /// Sum of minutes over completed entries.
    pub fn completed_total(&self) -> u32 {
        self.slices
            .iter()
            .filter(|s| s.outcome == SliceOutcome::Completed)
            .map(|s| s.minutes)
            .sum()
    }
}

/// Partial update applied to an existing allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationUpdate {
    /// Entries appended to the end of the allocation
    pub append: Vec<AllocatedSlice>,
    /// Minutes added to the recorded capacity
    pub extra_capacity: u32,
    /// Outcome to record for one work unit's entry
    pub outcome: Option<(u64, SliceOutcome)>,
}
