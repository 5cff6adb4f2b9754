//! Target-date feasibility results.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Whether a body of work fits before a target date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeasibilityReport {
    pub is_feasible: bool,
    /// Minutes per day needed to land on the target (0 without a target)
    pub required_daily_minutes: u32,
    /// Estimated sustainable minutes per day
    pub available_capacity: u32,
    pub target_date: Option<Date>,
    /// Offered only when the target does not fit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_date: Option<Date>,
    pub message: String,
}

/// A proposed target date for a new goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetSuggestion {
    pub suggested_date: Date,
    /// Active goals sharing daily capacity, including the new one
    pub concurrent_goals: u32,
    /// Minutes per day this goal can expect
    pub daily_allocation: u32,
    pub days_needed: u32,
}
