//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::GoalSummary;

/// Newtype wrapper for displaying a list of goal summaries.
///
/// An empty list renders as a single neutral line rather than nothing.
///
/// # Examples
///
/// ```rust
/// use stride_core::{
///     display::GoalSummaries,
///     models::{GoalStatus, GoalSummary},
/// };
/// use jiff::Timestamp;
///
/// let goal = GoalSummary {
///     id: 1,
///     title: "Learn Spanish".to_string(),
///     status: GoalStatus::Active,
///     target_date: None,
///     lifelong: false,
///     created_at: Timestamp::now(),
///     task_count: 2,
///     total_minutes: 600,
///     completed_minutes: 150,
/// };
///
/// let output = format!("{}", GoalSummaries(vec![goal]));
/// assert!(output.contains("Learn Spanish"));
/// assert!(output.contains("25%"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GoalSummaries(pub Vec<GoalSummary>);

impl GoalSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&GoalSummary> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GoalSummary> {
        self.0.iter()
    }
}

impl Index<usize> for GoalSummaries {
    type Output = GoalSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for GoalSummaries {
    type Item = GoalSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a GoalSummaries {
    type Item = &'a GoalSummary;
    type IntoIter = std::slice::Iter<'a, GoalSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for GoalSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No goals found.");
        }
        for goal in &self.0 {
            write!(f, "{goal}")?;
        }
        Ok(())
    }
}
