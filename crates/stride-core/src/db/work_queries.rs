//! Task and work unit operations, progress tracking, and snapshots.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{id_column, minutes_column, parse_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Task, WorkKind, WorkUnit},
    store::WorkSnapshot,
};

const TASK_COLUMNS: &str = "t.id, t.goal_id, t.title, t.estimated_total_minutes, t.completed_minutes, t.task_order, t.created_at, t.updated_at";
const WORK_UNIT_COLUMNS: &str = "w.id, w.task_id, w.title, w.kind, w.estimated_total_minutes, w.completed_minutes, w.first_action, w.success_signal, w.created_at, w.updated_at";

const GET_NEXT_TASK_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(task_order), -1) + 1 FROM tasks WHERE goal_id = ?1";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (goal_id, title, estimated_total_minutes, completed_minutes, task_order, created_at, updated_at) VALUES (?1, ?2, 0, 0, ?3, ?4, ?5)";
const INSERT_WORK_UNIT_SQL: &str = "INSERT INTO work_units (task_id, title, kind, estimated_total_minutes, completed_minutes, first_action, success_signal, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7, ?8)";
const GROW_TASK_ESTIMATE_SQL: &str = "UPDATE tasks SET estimated_total_minutes = estimated_total_minutes + ?1, updated_at = ?2 WHERE id = ?3";
const TOUCH_GOAL_SQL: &str = "UPDATE goals SET updated_at = ?1 WHERE id = ?2";
const ADD_WORK_UNIT_PROGRESS_SQL: &str = "UPDATE work_units SET completed_minutes = MIN(completed_minutes + ?1, estimated_total_minutes), updated_at = ?2 WHERE id = ?3";
const ADD_TASK_PROGRESS_SQL: &str = "UPDATE tasks SET completed_minutes = MIN(completed_minutes + ?1, estimated_total_minutes), updated_at = ?2 WHERE id = ?3";
const RESET_WORK_UNITS_SQL: &str = "UPDATE work_units SET completed_minutes = 0, updated_at = ?1 WHERE task_id IN (SELECT id FROM tasks WHERE goal_id = ?2)";
const RESET_TASKS_SQL: &str =
    "UPDATE tasks SET completed_minutes = 0, updated_at = ?1 WHERE goal_id = ?2";

impl super::Database {
    /// Helper function to construct a Task (without work units) from a row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: id_column(row, 0)?,
            goal_id: id_column(row, 1)?,
            title: row.get(2)?,
            estimated_total_minutes: minutes_column(row, 3)?,
            completed_minutes: minutes_column(row, 4)?,
            order: minutes_column(row, 5)?,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
            work_units: Vec::new(),
        })
    }

    fn build_work_unit_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkUnit> {
        Ok(WorkUnit {
            id: id_column(row, 0)?,
            task_id: id_column(row, 1)?,
            title: row.get(2)?,
            kind: parse_column::<WorkKind>(row, 3)?,
            estimated_total_minutes: minutes_column(row, 4)?,
            completed_minutes: minutes_column(row, 5)?,
            first_action: row.get(6)?,
            success_signal: row.get(7)?,
            created_at: timestamp_column(row, 8)?,
            updated_at: timestamp_column(row, 9)?,
        })
    }

    /// Appends a task to the end of a goal.
    pub fn add_task(&mut self, goal_id: u64, title: &str) -> Result<Task> {
        if self.goal_row(goal_id)?.is_none() {
            return Err(PlannerError::GoalNotFound { id: goal_id });
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let next_order: i64 = tx
            .query_row(GET_NEXT_TASK_ORDER_SQL, params![goal_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next task order")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_TASK_SQL,
            params![goal_id as i64, title, next_order, &now_str, &now_str],
        )
        .db_context("Failed to insert task")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(TOUCH_GOAL_SQL, params![&now_str, goal_id as i64])
            .db_context("Failed to update goal timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            id,
            goal_id,
            title: title.into(),
            estimated_total_minutes: 0,
            completed_minutes: 0,
            order: next_order as u32,
            created_at: now,
            updated_at: now,
            work_units: Vec::new(),
        })
    }

    /// Retrieves a task by its ID, with its work units.
    pub fn get_task(&self, id: u64) -> Result<Option<Task>> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.id = ?1");
        let mut task = self
            .connection
            .query_row(&query, params![id as i64], Self::build_task_from_row)
            .optional()
            .db_context("Failed to query task")?;

        if let Some(ref mut task) = task {
            task.work_units = self.get_work_units(task.id)?;
        }

        Ok(task)
    }

    /// Retrieves all tasks of a goal in order, each with its work units.
    pub fn get_tasks(&self, goal_id: u64) -> Result<Vec<Task>> {
        let query =
            format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.goal_id = ?1 ORDER BY t.task_order");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let mut tasks = stmt
            .query_map(params![goal_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        for task in &mut tasks {
            task.work_units = self.get_work_units(task.id)?;
        }

        Ok(tasks)
    }

    /// Adds a work unit to a task and grows the task's estimate by the same
    /// amount.
    pub fn add_work_unit(
        &mut self,
        task_id: u64,
        title: &str,
        kind: WorkKind,
        estimated_minutes: u32,
        first_action: Option<&str>,
        success_signal: Option<&str>,
    ) -> Result<WorkUnit> {
        let task = self
            .get_task(task_id)?
            .ok_or(PlannerError::TaskNotFound { id: task_id })?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_WORK_UNIT_SQL,
            params![
                task_id as i64,
                title,
                kind.as_str(),
                estimated_minutes,
                first_action,
                success_signal,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert work unit")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            GROW_TASK_ESTIMATE_SQL,
            params![estimated_minutes, &now_str, task_id as i64],
        )
        .db_context("Failed to update task estimate")?;
        tx.execute(TOUCH_GOAL_SQL, params![&now_str, task.goal_id as i64])
            .db_context("Failed to update goal timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(WorkUnit {
            id,
            task_id,
            title: title.into(),
            kind,
            estimated_total_minutes: estimated_minutes,
            completed_minutes: 0,
            first_action: first_action.map(String::from),
            success_signal: success_signal.map(String::from),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_work_unit(&self, id: u64) -> Result<Option<WorkUnit>> {
        let query = format!("SELECT {WORK_UNIT_COLUMNS} FROM work_units w WHERE w.id = ?1");
        self.connection
            .query_row(&query, params![id as i64], Self::build_work_unit_from_row)
            .optional()
            .db_context("Failed to query work unit")
    }

    pub fn get_work_units(&self, task_id: u64) -> Result<Vec<WorkUnit>> {
        let query =
            format!("SELECT {WORK_UNIT_COLUMNS} FROM work_units w WHERE w.task_id = ?1 ORDER BY w.id");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let units = stmt
            .query_map(params![task_id as i64], Self::build_work_unit_from_row)
            .db_context("Failed to query work units")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch work units")?;

        Ok(units)
    }

    /// Adds minutes of progress to a work unit and its task, each clamped to
    /// its estimate.
    pub fn add_progress(&mut self, work_unit_id: u64, minutes: u32) -> Result<WorkUnit> {
        let unit = self
            .get_work_unit(work_unit_id)?
            .ok_or(PlannerError::WorkUnitNotFound { id: work_unit_id })?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        tx.execute(
            ADD_WORK_UNIT_PROGRESS_SQL,
            params![minutes, &now, work_unit_id as i64],
        )
        .db_context("Failed to record work unit progress")?;
        tx.execute(
            ADD_TASK_PROGRESS_SQL,
            params![minutes, &now, unit.task_id as i64],
        )
        .db_context("Failed to record task progress")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_work_unit(work_unit_id)?
            .ok_or(PlannerError::WorkUnitNotFound { id: work_unit_id })
    }

    /// Zeroes the progress of every task and work unit under a goal.
    pub fn reset_progress(&mut self, goal_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        tx.execute(RESET_WORK_UNITS_SQL, params![&now, goal_id as i64])
            .db_context("Failed to reset work unit progress")?;
        tx.execute(RESET_TASKS_SQL, params![&now, goal_id as i64])
            .db_context("Failed to reset task progress")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Flat view of every non-deleted goal, task, and work unit.
    pub fn load_snapshot(&self) -> Result<WorkSnapshot> {
        let goals = self.goal_rows()?;

        let task_query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks t JOIN goals g ON g.id = t.goal_id \
             WHERE g.deleted_at IS NULL ORDER BY t.goal_id, t.task_order"
        );
        let mut stmt = self
            .connection
            .prepare(&task_query)
            .db_context("Failed to prepare query")?;
        let tasks = stmt
            .query_map([], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        let unit_query = format!(
            "SELECT {WORK_UNIT_COLUMNS} FROM work_units w JOIN tasks t ON t.id = w.task_id \
             JOIN goals g ON g.id = t.goal_id WHERE g.deleted_at IS NULL ORDER BY w.id"
        );
        let mut stmt = self
            .connection
            .prepare(&unit_query)
            .db_context("Failed to prepare query")?;
        let work_units = stmt
            .query_map([], Self::build_work_unit_from_row)
            .db_context("Failed to query work units")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch work units")?;

        Ok(WorkSnapshot {
            goals,
            tasks,
            work_units,
        })
    }
}
