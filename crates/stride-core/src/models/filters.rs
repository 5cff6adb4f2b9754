//! Filter types for querying goals.

use super::GoalStatus;

/// Filter options for querying goals.
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    /// Filter by goal title (case-insensitive partial match)
    pub title_contains: Option<String>,

    /// Filter by goal status. `None` lists every non-deleted goal.
    pub status: Option<GoalStatus>,
}

impl GoalFilter {
    /// Filter matching a single status.
    ///
    /// ```rust
    /// use stride_core::models::{GoalFilter, GoalStatus};
    ///
    /// let filter = GoalFilter::with_status(GoalStatus::Paused);
    /// assert_eq!(filter.status, Some(GoalStatus::Paused));
    /// assert!(filter.title_contains.is_none());
    /// ```
    pub fn with_status(status: GoalStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl TryFrom<&crate::params::ListGoals> for GoalFilter {
    type Error = crate::PlannerError;

    /// Convert ListGoals parameters to a GoalFilter, validating the status.
    ///
    /// ```rust
    /// use stride_core::{models::{GoalFilter, GoalStatus}, params::ListGoals};
    ///
    /// let params = ListGoals { status: Some("paused".to_string()), all: false };
    /// let filter = GoalFilter::try_from(&params).unwrap();
    /// assert_eq!(filter.status, Some(GoalStatus::Paused));
    ///
    /// // Active goals by default
    /// let filter = GoalFilter::try_from(&ListGoals::default()).unwrap();
    /// assert_eq!(filter.status, Some(GoalStatus::Active));
    ///
    /// let params = ListGoals { status: None, all: true };
    /// let filter = GoalFilter::try_from(&params).unwrap();
    /// assert_eq!(filter.status, None);
    /// ```
    fn try_from(params: &crate::params::ListGoals) -> crate::Result<Self> {
        if params.all {
            return Ok(Self::default());
        }
        let status = match params.status.as_deref() {
            Some(s) => s.parse::<GoalStatus>().map_err(|reason| {
                crate::PlannerError::invalid_input("status").with_reason(reason)
            })?,
            None => GoalStatus::Active,
        };
        Ok(Self::with_status(status))
    }
}
