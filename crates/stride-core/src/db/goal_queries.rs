//! Goal CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension};

use super::utils::{date_column, id_column, minutes_column, parse_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Goal, GoalFilter, GoalStatus, GoalSummary},
    params::GoalChanges,
};

const INSERT_GOAL_SQL: &str = "INSERT INTO goals (title, status, target_date, lifelong, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_GOAL_SQL: &str = "SELECT id, title, status, target_date, lifelong, created_at, updated_at FROM goals WHERE id = ?1 AND deleted_at IS NULL";
const SELECT_ALL_GOALS_SQL: &str = "SELECT id, title, status, target_date, lifelong, created_at, updated_at FROM goals WHERE deleted_at IS NULL ORDER BY id";
const UPDATE_GOAL_STATUS_SQL: &str =
    "UPDATE goals SET status = ?1, updated_at = ?2 WHERE id = ?3 AND deleted_at IS NULL";
const UPDATE_GOAL_TARGET_SQL: &str =
    "UPDATE goals SET target_date = ?1, updated_at = ?2 WHERE id = ?3 AND deleted_at IS NULL";
const SOFT_DELETE_GOAL_SQL: &str =
    "UPDATE goals SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL";
const DELETE_GOAL_TASKS_SQL: &str = "DELETE FROM tasks WHERE goal_id = ?1";
const COUNT_ACTIVE_GOALS_SQL: &str =
    "SELECT COUNT(*) FROM goals WHERE status = 'active' AND deleted_at IS NULL AND id != ?1";

const GOAL_SUMMARY_COLUMNS: &str = "id, title, status, target_date, lifelong, created_at, task_count, total_minutes, completed_minutes";

impl super::Database {
    /// Helper function to construct a Goal (without tasks) from a database row
    pub(super) fn build_goal_from_row(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
        Ok(Goal {
            id: id_column(row, 0)?,
            title: row.get(1)?,
            status: parse_column::<GoalStatus>(row, 2)?,
            target_date: date_column(row, 3)?,
            lifelong: row.get(4)?,
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
            tasks: Vec::new(),
        })
    }

    /// Creates a new active goal.
    pub fn create_goal(
        &mut self,
        title: &str,
        target_date: Option<Date>,
        lifelong: bool,
    ) -> Result<Goal> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_GOAL_SQL,
                params![
                    title,
                    GoalStatus::Active.as_str(),
                    target_date.map(|d| d.to_string()),
                    lifelong,
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert goal")?;

        Ok(Goal {
            id: self.connection.last_insert_rowid() as u64,
            title: title.into(),
            status: GoalStatus::Active,
            target_date,
            lifelong,
            created_at: now,
            updated_at: now,
            tasks: Vec::new(),
        })
    }

    /// Retrieves a goal by its ID, with its tasks and their work units.
    pub fn get_goal(&self, id: u64) -> Result<Option<Goal>> {
        let mut goal = self.goal_row(id)?;

        if let Some(ref mut goal) = goal {
            goal.tasks = self.get_tasks(goal.id)?;
        }

        Ok(goal)
    }

    /// Retrieves a goal by its ID without loading children.
    pub(super) fn goal_row(&self, id: u64) -> Result<Option<Goal>> {
        self.connection
            .query_row(SELECT_GOAL_SQL, params![id as i64], Self::build_goal_from_row)
            .optional()
            .db_context("Failed to query goal")
    }

    /// Every non-deleted goal, without children.
    pub(super) fn goal_rows(&self) -> Result<Vec<Goal>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ALL_GOALS_SQL)
            .db_context("Failed to prepare query")?;
        let goals = stmt
            .query_map([], Self::build_goal_from_row)
            .db_context("Failed to query goals")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch goals")?;

        Ok(goals)
    }

    /// Lists goal summaries with optional filtering, oldest first.
    pub fn list_goals(&self, filter: Option<&GoalFilter>) -> Result<Vec<GoalSummary>> {
        let mut query = format!("SELECT {GOAL_SUMMARY_COLUMNS} FROM goal_summaries");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref title) = f.title_contains {
                conditions.push("title LIKE ?");
                params_vec.push(Box::new(format!("%{title}%")));
            }

            if let Some(ref status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], |row| {
                Ok(GoalSummary {
                    id: id_column(row, 0)?,
                    title: row.get(1)?,
                    status: parse_column::<GoalStatus>(row, 2)?,
                    target_date: date_column(row, 3)?,
                    lifelong: row.get(4)?,
                    created_at: timestamp_column(row, 5)?,
                    task_count: minutes_column(row, 6)?,
                    total_minutes: minutes_column(row, 7)?,
                    completed_minutes: minutes_column(row, 8)?,
                })
            })
            .db_context("Failed to query goals")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch goals")?;

        Ok(summaries)
    }

    /// Applies status and target date changes to a goal.
    pub fn update_goal(&mut self, id: u64, changes: &GoalChanges) -> Result<Goal> {
        if self.goal_row(id)?.is_none() {
            return Err(PlannerError::GoalNotFound { id });
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();

        if let Some(status) = changes.status {
            tx.execute(
                UPDATE_GOAL_STATUS_SQL,
                params![status.as_str(), &now, id as i64],
            )
            .db_context("Failed to update goal status")?;
        }

        if let Some(target_date) = changes.target_date {
            tx.execute(
                UPDATE_GOAL_TARGET_SQL,
                params![target_date.map(|d| d.to_string()), &now, id as i64],
            )
            .db_context("Failed to update goal target date")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_goal(id)?.ok_or(PlannerError::GoalNotFound { id })
    }

    /// Sets a goal's status. Returns `None` if the goal doesn't exist.
    pub fn set_goal_status(&mut self, id: u64, status: GoalStatus) -> Result<Option<Goal>> {
        let now = Timestamp::now().to_string();
        let rows_affected = self
            .connection
            .execute(
                UPDATE_GOAL_STATUS_SQL,
                params![status.as_str(), &now, id as i64],
            )
            .db_context("Failed to update goal status")?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.goal_row(id)
    }

    /// Soft-deletes a goal and permanently removes its tasks and work units.
    ///
    /// Returns the goal as it was before deletion.
    pub fn delete_goal(&mut self, id: u64) -> Result<Goal> {
        let goal = self
            .get_goal(id)?
            .ok_or(PlannerError::GoalNotFound { id })?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Work units go with their tasks through ON DELETE CASCADE
        tx.execute(DELETE_GOAL_TASKS_SQL, params![id as i64])
            .db_context("Failed to delete goal tasks")?;

        let now = Timestamp::now().to_string();
        tx.execute(SOFT_DELETE_GOAL_SQL, params![&now, id as i64])
            .db_context("Failed to delete goal")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(goal)
    }

    /// Counts active goals, leaving out `exclude` when given.
    pub fn count_active_goals(&self, exclude: Option<u64>) -> Result<u32> {
        // Ids start at 1, so 0 excludes nothing
        let exclude = exclude.unwrap_or(0) as i64;
        let count: i64 = self
            .connection
            .query_row(COUNT_ACTIVE_GOALS_SQL, params![exclude], |row| row.get(0))
            .db_context("Failed to count active goals")?;
        Ok(count as u32)
    }
}
