//! Parameter structures for Stride operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI, MCP, etc.) without framework-specific derives or
//! dependencies. Dates, statuses, and modes arrive as plain strings and are
//! validated here, so every interface reports the same errors.
//!
//! ## Architecture: Parameter Wrapper Pattern
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers wrap these types with their own derives and convert via
//! `From`. JSON schema generation is available behind the `schema` feature.

use jiff::{civil::Date, Zoned};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{GoalStatus, PlanMode, WorkKind},
};

/// Upper bound on a single work unit's estimate, in minutes.
pub const MAX_WORK_UNIT_MINUTES: u32 = 600;

/// Upper bound on extra minutes pulled into one day.
pub const MAX_EXTRA_MINUTES: u32 = 24 * 60;

/// Today's date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Parse an optional ISO date, reporting the offending field on failure.
///
/// ```rust
/// use stride_core::params::parse_date;
///
/// let date = parse_date("target_date", Some("2025-06-01")).unwrap();
/// assert_eq!(date, Some(jiff::civil::date(2025, 6, 1)));
/// assert_eq!(parse_date("target_date", None).unwrap(), None);
/// assert!(parse_date("target_date", Some("next week")).is_err());
/// ```
pub fn parse_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    value
        .map(|s| {
            s.trim().parse::<Date>().map_err(|e| {
                PlannerError::invalid_input(field).with_reason(format!(
                    "'{s}' is not a valid YYYY-MM-DD date: {e}"
                ))
            })
        })
        .transpose()
}

/// Parse an optional date, falling back to today.
fn date_or_today(value: Option<&str>) -> Result<Date> {
    Ok(parse_date("date", value)?.unwrap_or_else(today))
}

fn parse_mode(value: Option<&str>) -> Result<PlanMode> {
    value
        .map(|s| {
            s.parse::<PlanMode>()
                .map_err(|reason| PlannerError::invalid_input("mode").with_reason(reason))
        })
        .transpose()
        .map(Option::unwrap_or_default)
}

fn require_title(field: &str, title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateGoal {
    /// Title of the goal (required)
    pub title: String,
    /// Optional target date (YYYY-MM-DD)
    pub target_date: Option<String>,
    /// Lifelong goals never complete; their progress resets instead
    #[serde(default)]
    pub lifelong: bool,
}

impl CreateGoal {
    /// Validate the title and parse the target date.
    pub fn validate(&self) -> Result<Option<Date>> {
        require_title("title", &self.title)?;
        parse_date("target_date", self.target_date.as_deref())
    }
}

/// Parameters for listing goals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListGoals {
    /// Status to list ('active', 'paused', 'completed'); defaults to active
    pub status: Option<String>,
    /// List goals of every status
    #[serde(default)]
    pub all: bool,
}

/// Parameters for updating a goal's status or target date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateGoal {
    /// Goal ID to update (required)
    pub id: u64,
    /// New status ('active', 'paused', or 'completed')
    pub status: Option<String>,
    /// New target date (YYYY-MM-DD)
    pub target_date: Option<String>,
    /// Remove the target date entirely
    #[serde(default)]
    pub clear_target_date: bool,
}

/// Validated form of [`UpdateGoal`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalChanges {
    pub status: Option<GoalStatus>,
    /// `Some(None)` clears the target date
    pub target_date: Option<Option<Date>>,
}

impl UpdateGoal {
    /// Validate and parse the requested changes.
    ///
    /// ```rust
    /// use stride_core::{models::GoalStatus, params::UpdateGoal};
    ///
    /// let params = UpdateGoal {
    ///     id: 1,
    ///     status: Some("paused".to_string()),
    ///     ..Default::default()
    /// };
    /// let changes = params.validate().unwrap();
    /// assert_eq!(changes.status, Some(GoalStatus::Paused));
    /// assert_eq!(changes.target_date, None);
    ///
    /// let params = UpdateGoal {
    ///     id: 1,
    ///     target_date: Some("2025-01-01".to_string()),
    ///     clear_target_date: true,
    ///     ..Default::default()
    /// };
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<GoalChanges> {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                s.parse::<GoalStatus>()
                    .map_err(|reason| PlannerError::invalid_input("status").with_reason(reason))
            })
            .transpose()?;

        let target_date = match (self.clear_target_date, self.target_date.as_deref()) {
            (true, Some(_)) => {
                return Err(PlannerError::invalid_input("target_date")
                    .with_reason("cannot set and clear the target date at once"));
            }
            (true, None) => Some(None),
            (false, value) => parse_date("target_date", value)?.map(Some),
        };

        Ok(GoalChanges {
            status,
            target_date,
        })
    }
}

/// Parameters for deleting a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteGoal {
    /// ID of the goal to delete
    pub id: u64,
    /// Must be true to confirm the goal and all its tasks are removed
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding a task (milestone) to a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTask {
    /// ID of the goal to add the task to
    pub goal_id: u64,
    /// Title of the task (required)
    pub title: String,
}

impl AddTask {
    pub fn validate(&self) -> Result<()> {
        require_title("title", &self.title)
    }
}

/// Parameters for adding a work unit to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddWorkUnit {
    /// ID of the task to add the work unit to
    pub task_id: u64,
    /// Title of the work unit (required)
    pub title: String,
    /// Kind of work ('study', 'practice', 'build', 'review', 'explore')
    pub kind: Option<String>,
    /// Estimated effort in minutes (1 to 600)
    pub estimated_minutes: u32,
    /// Optional concrete first action
    pub first_action: Option<String>,
    /// Optional signal that the work unit is finished
    pub success_signal: Option<String>,
}

impl AddWorkUnit {
    /// Validate the title and estimate, and parse the kind.
    ///
    /// ```rust
    /// use stride_core::{models::WorkKind, params::AddWorkUnit};
    ///
    /// let params = AddWorkUnit {
    ///     task_id: 1,
    ///     title: "Write tests".to_string(),
    ///     kind: Some("build".to_string()),
    ///     estimated_minutes: 90,
    ///     ..Default::default()
    /// };
    /// assert_eq!(params.validate().unwrap(), WorkKind::Build);
    ///
    /// let params = AddWorkUnit { estimated_minutes: 0, ..params };
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<WorkKind> {
        require_title("title", &self.title)?;
        if !(1..=MAX_WORK_UNIT_MINUTES).contains(&self.estimated_minutes) {
            return Err(PlannerError::invalid_input("estimated_minutes").with_reason(format!(
                "must be between 1 and {MAX_WORK_UNIT_MINUTES}"
            )));
        }
        self.kind
            .as_deref()
            .map(|s| {
                s.parse::<WorkKind>()
                    .map_err(|reason| PlannerError::invalid_input("kind").with_reason(reason))
            })
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Parameters for generating (or regenerating) a daily plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GeneratePlan {
    /// Date to plan (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    /// Slice size profile ('light', 'medium', 'focus'); defaults to medium
    pub mode: Option<String>,
}

impl GeneratePlan {
    /// Resolve the date and mode.
    pub fn validate(&self) -> Result<(Date, PlanMode)> {
        Ok((
            date_or_today(self.date.as_deref())?,
            parse_mode(self.mode.as_deref())?,
        ))
    }
}

/// Parameters for pulling extra slices into an existing day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddMoreSlices {
    /// Date to extend (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    /// Additional minutes of work wanted
    pub extra_minutes: u32,
    /// Mode used when the day has no plan yet; defaults to medium
    pub mode: Option<String>,
}

impl AddMoreSlices {
    /// Resolve the date and fallback mode. Extra minutes must fit in a day.
    pub fn validate(&self) -> Result<(Date, PlanMode)> {
        if !(1..=MAX_EXTRA_MINUTES).contains(&self.extra_minutes) {
            return Err(PlannerError::invalid_input("extra_minutes")
                .with_reason(format!("must be between 1 and {MAX_EXTRA_MINUTES}")));
        }
        Ok((
            date_or_today(self.date.as_deref())?,
            parse_mode(self.mode.as_deref())?,
        ))
    }
}

/// Parameters for reading back a stored daily plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ShowPlan {
    /// Date to show (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

impl ShowPlan {
    pub fn validate(&self) -> Result<Date> {
        date_or_today(self.date.as_deref())
    }
}

/// Identifies one slice: a work unit within a date's plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SliceRef {
    /// Date of the plan holding the slice (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    /// Work unit the slice belongs to
    pub work_unit_id: u64,
}

impl SliceRef {
    pub fn validate(&self) -> Result<Date> {
        date_or_today(self.date.as_deref())
    }
}

/// Parameters for checking whether work fits before a target date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AssessFeasibility {
    /// Total effort in minutes
    pub total_minutes: u32,
    /// Optional target date (YYYY-MM-DD)
    pub target_date: Option<String>,
}

impl AssessFeasibility {
    pub fn validate(&self) -> Result<Option<Date>> {
        parse_date("target_date", self.target_date.as_deref())
    }
}

/// Parameters for proposing a target date for a new goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SuggestTargetDate {
    /// Total effort in minutes
    pub total_minutes: u32,
    /// Goal to leave out of the concurrent-goal count (e.g. the goal being edited)
    pub exclude_goal_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_plan_defaults() {
        let (date, mode) = GeneratePlan::default().validate().unwrap();
        assert_eq!(date, today());
        assert_eq!(mode, PlanMode::Medium);
    }

    #[test]
    fn test_generate_plan_rejects_bad_mode() {
        let params = GeneratePlan {
            date: None,
            mode: Some("sprint".to_string()),
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "mode"));
    }

    #[test]
    fn test_add_more_slices_requires_minutes() {
        let params = AddMoreSlices {
            date: Some("2025-02-01".to_string()),
            extra_minutes: 0,
            mode: None,
        };
        assert!(params.validate().is_err());

        let params = AddMoreSlices {
            extra_minutes: MAX_EXTRA_MINUTES + 1,
            ..params
        };
        assert!(params.validate().is_err());

        let params = AddMoreSlices {
            extra_minutes: 30,
            ..params
        };
        let (date, mode) = params.validate().unwrap();
        assert_eq!(date, jiff::civil::date(2025, 2, 1));
        assert_eq!(mode, PlanMode::Medium);
    }

    #[test]
    fn test_create_goal_rejects_blank_title() {
        let params = CreateGoal {
            title: "   ".to_string(),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_work_unit_estimate_upper_bound() {
        let params = AddWorkUnit {
            task_id: 1,
            title: "Huge".to_string(),
            estimated_minutes: MAX_WORK_UNIT_MINUTES + 1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_update_goal_clear_target() {
        let params = UpdateGoal {
            id: 3,
            clear_target_date: true,
            ..Default::default()
        };
        let changes = params.validate().unwrap();
        assert_eq!(changes.target_date, Some(None));
        assert_eq!(changes.status, None);
    }
}
