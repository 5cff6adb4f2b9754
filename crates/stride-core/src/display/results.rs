//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update, and delete operations with consistent messaging and resource
//! display.

use std::fmt;

use crate::models::{Goal, Task, WorkUnit};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use stride_core::{
///     display::CreateResult,
///     models::{Goal, GoalStatus},
/// };
/// use jiff::Timestamp;
///
/// let goal = Goal {
///     id: 7,
///     title: "Write a novel".to_string(),
///     status: GoalStatus::Active,
///     target_date: None,
///     lifelong: false,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     tasks: vec![],
/// };
///
/// let output = CreateResult::new(goal).to_string();
/// assert!(output.starts_with("Created goal with ID: 7"));
/// ```
#[derive(Debug)]
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created goal with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created task with ID: {} in goal {}",
            self.resource.id, self.resource.goal_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<WorkUnit> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created work unit with ID: {} in task {}",
            self.resource.id, self.resource.task_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// list of changes that were applied.
#[derive(Debug)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated goal with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
#[derive(Debug)]
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tasks = self.resource.tasks.len();
        let units: usize = self.resource.tasks.iter().map(|t| t.work_units.len()).sum();
        writeln!(
            f,
            "Deleted goal '{}' (ID: {}) with {tasks} tasks and {units} work units",
            self.resource.title, self.resource.id
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::GoalStatus;

    fn goal() -> Goal {
        Goal {
            id: 3,
            title: "Garden".to_string(),
            status: GoalStatus::Paused,
            target_date: None,
            lifelong: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            tasks: vec![],
        }
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(goal(), vec!["Status set to paused".to_string()]);
        let output = result.to_string();
        assert!(output.starts_with("Updated goal with ID: 3"));
        assert!(output.contains("Changes made:\n- Status set to paused"));
        assert!(output.contains("# 3. Garden"));

        let output = UpdateResult::new(goal()).to_string();
        assert!(!output.contains("Changes made:"));
    }

    #[test]
    fn test_delete_result() {
        let output = DeleteResult::new(goal()).to_string();
        assert_eq!(
            output,
            "Deleted goal 'Garden' (ID: 3) with 0 tasks and 0 work units\n"
        );
    }
}
