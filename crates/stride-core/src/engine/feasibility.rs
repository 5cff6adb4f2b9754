//! Target-date projection.
//!
//! These functions are pure and never fail. Callers that cannot estimate
//! capacity pass the configured default instead.

use jiff::{civil::Date, ToSpan};

use super::EngineConfig;
use crate::models::{FeasibilityReport, TargetSuggestion};

/// Check whether `total_minutes` of work fits between `today` and `target`
/// at `capacity` minutes per day.
///
/// ```rust
/// use jiff::civil::date;
/// use stride_core::engine::{assess_feasibility, EngineConfig};
///
/// let config = EngineConfig::default();
/// let today = date(2025, 3, 1);
/// let report = assess_feasibility(600, Some(date(2025, 3, 11)), 60, today, &config);
/// assert!(report.is_feasible);
/// assert_eq!(report.required_daily_minutes, 60);
///
/// let open_ended = assess_feasibility(10_000, None, 60, today, &config);
/// assert!(open_ended.is_feasible);
/// assert_eq!(open_ended.required_daily_minutes, 0);
/// ```
pub fn assess_feasibility(
    total_minutes: u32,
    target: Option<Date>,
    capacity: u32,
    today: Date,
    config: &EngineConfig,
) -> FeasibilityReport {
    let Some(target) = target else {
        return FeasibilityReport {
            is_feasible: true,
            required_daily_minutes: 0,
            available_capacity: capacity,
            target_date: None,
            suggested_date: None,
            message: "No target date set.".to_string(),
        };
    };

    let days_remaining = days_between(today, target).max(1);
    let required = total_minutes.div_ceil(days_remaining);
    if required <= capacity {
        return FeasibilityReport {
            is_feasible: true,
            required_daily_minutes: required,
            available_capacity: capacity,
            target_date: Some(target),
            suggested_date: None,
            message: format!(
                "About {required} minutes a day over {days_remaining} days fits within {capacity}."
            ),
        };
    }

    let buffered = buffered_days(total_minutes, capacity.max(1), config.feasibility_buffer);
    let suggested = today
        .saturating_add(i64::from(buffered).days())
        .max(target.saturating_add(1.days()));
    FeasibilityReport {
        is_feasible: false,
        required_daily_minutes: required,
        available_capacity: capacity,
        target_date: Some(target),
        suggested_date: Some(suggested),
        message: format!(
            "Needs about {required} minutes a day against {capacity} available. \
             {suggested} is a more comfortable target."
        ),
    }
}

/// Propose a target date for a new goal that shares daily capacity with
/// `other_active_goals` existing goals.
pub fn suggest_target_date(
    total_minutes: u32,
    other_active_goals: u32,
    capacity: u32,
    today: Date,
    config: &EngineConfig,
) -> TargetSuggestion {
    let concurrent_goals = other_active_goals + 1;
    let daily_allocation = (capacity / concurrent_goals)
        .max(config.min_goal_daily_minutes)
        .max(1);
    let days_needed = buffered_days(total_minutes, daily_allocation, config.suggestion_buffer);

    TargetSuggestion {
        suggested_date: today.saturating_add(i64::from(days_needed).days()),
        concurrent_goals,
        daily_allocation,
        days_needed,
    }
}

/// Whole days from `from` to `to`, zero when `to` is not after `from`.
fn days_between(from: Date, to: Date) -> u32 {
    let days = from.until(to).map(|span| span.get_days()).unwrap_or(0);
    u32::try_from(days).unwrap_or(0)
}

fn buffered_days(total_minutes: u32, per_day: u32, buffer: f64) -> u32 {
    (f64::from(total_minutes) / f64::from(per_day) * buffer).ceil() as u32
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn today() -> Date {
        date(2025, 3, 1)
    }

    #[test]
    fn test_without_target_always_feasible() {
        let config = EngineConfig::default();
        for total in [0, 60, 1_000_000] {
            let report = assess_feasibility(total, None, 60, today(), &config);
            assert!(report.is_feasible);
            assert_eq!(report.required_daily_minutes, 0);
            assert!(report.suggested_date.is_none());
        }
    }

    #[test]
    fn test_required_rounds_up() {
        let config = EngineConfig::default();
        // 601 / 10 days = 60.1 -> 61
        let report = assess_feasibility(601, Some(date(2025, 3, 11)), 60, today(), &config);
        assert_eq!(report.required_daily_minutes, 61);
        assert!(!report.is_feasible);
    }

    #[test]
    fn test_infeasible_suggests_later_date() {
        let config = EngineConfig::default();
        let target = date(2025, 3, 5);
        let report = assess_feasibility(1170, Some(target), 60, today(), &config);
        assert!(!report.is_feasible);
        assert_eq!(report.required_daily_minutes, 293);
        // ceil(1170 / 60 * 1.1) = ceil(21.45) = 22 days
        assert_eq!(report.suggested_date, Some(date(2025, 3, 23)));
        assert!(report.suggested_date.unwrap() > target);
    }

    #[test]
    fn test_past_target_counts_as_one_day() {
        let config = EngineConfig::default();
        let target = date(2025, 2, 1);
        let report = assess_feasibility(90, Some(target), 60, today(), &config);
        assert_eq!(report.required_daily_minutes, 90);
        assert!(!report.is_feasible);
        let suggested = report.suggested_date.unwrap();
        assert!(suggested > target);
        // ceil(90 / 60 * 1.1) = 2 days
        assert_eq!(suggested, date(2025, 3, 3));
    }

    #[test]
    fn test_same_day_target() {
        let config = EngineConfig::default();
        let report = assess_feasibility(45, Some(today()), 60, today(), &config);
        assert!(report.is_feasible);
        assert_eq!(report.required_daily_minutes, 45);
    }

    #[test]
    fn test_suggestion_splits_capacity() {
        let config = EngineConfig::default();
        let suggestion = suggest_target_date(600, 1, 120, today(), &config);
        assert_eq!(suggestion.concurrent_goals, 2);
        assert_eq!(suggestion.daily_allocation, 60);
        // ceil(600 / 60 * 1.25) = 13
        assert_eq!(suggestion.days_needed, 13);
        assert_eq!(suggestion.suggested_date, date(2025, 3, 14));
    }

    #[test]
    fn test_suggestion_floors_daily_allocation() {
        let config = EngineConfig::default();
        let suggestion = suggest_target_date(100, 9, 60, today(), &config);
        assert_eq!(suggestion.concurrent_goals, 10);
        assert_eq!(suggestion.daily_allocation, 20);
        // ceil(100 / 20 * 1.25) = 7
        assert_eq!(suggestion.days_needed, 7);
    }
}
