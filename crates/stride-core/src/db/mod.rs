//! Database operations and SQLite management for goals and allocations.
//!
//! This module provides low-level database operations for Stride. It handles
//! SQLite connections and schema setup, and provides specialized query
//! interfaces for the goal hierarchy and per-date allocation records.
//! [`Database`] is also the production implementation of the engine's
//! [`WorkRepository`] and [`AllocationStore`] collaborators.

use std::path::Path;

use jiff::civil::Date;
use rusqlite::Connection;

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{AllocationUpdate, DailyAllocation, Goal, GoalStatus, Task, WorkUnit},
    store::{AllocationStore, WorkRepository, WorkSnapshot},
};

pub mod allocation_queries;
pub mod goal_queries;
pub mod migrations;
pub mod utils;
pub mod work_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

impl WorkRepository for Database {
    fn snapshot(&self) -> Result<WorkSnapshot> {
        self.load_snapshot()
    }

    fn work_unit(&self, id: u64) -> Result<Option<WorkUnit>> {
        self.get_work_unit(id)
    }

    fn task(&self, id: u64) -> Result<Option<Task>> {
        self.get_task(id)
    }

    fn goal_with_tasks(&self, id: u64) -> Result<Option<Goal>> {
        self.get_goal(id)
    }

    fn record_progress(&mut self, work_unit_id: u64, minutes: u32) -> Result<WorkUnit> {
        self.add_progress(work_unit_id, minutes)
    }

    fn complete_goal(&mut self, goal_id: u64) -> Result<()> {
        self.set_goal_status(goal_id, GoalStatus::Completed)?
            .map(|_| ())
            .ok_or(PlannerError::GoalNotFound { id: goal_id })
    }

    fn reset_goal_progress(&mut self, goal_id: u64) -> Result<()> {
        self.reset_progress(goal_id)
    }
}

impl AllocationStore for Database {
    fn get_by_date(&self, date: Date) -> Result<Option<DailyAllocation>> {
        self.get_allocation(date)
    }

    fn create(&mut self, record: &DailyAllocation) -> Result<()> {
        self.save_allocation(record)
    }

    fn update(&mut self, date: Date, update: &AllocationUpdate) -> Result<Option<DailyAllocation>> {
        self.update_allocation(date, update)
    }

    fn delete(&mut self, date: Date) -> Result<bool> {
        self.delete_allocation(date)
    }

    fn with_outcomes(&self) -> Result<Vec<DailyAllocation>> {
        self.allocations_with_outcomes()
    }
}
