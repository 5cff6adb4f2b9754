//! Per-date allocation records.
//!
//! An allocation lives in two tables: `allocations` holds the per-day totals
//! and `allocation_slices` holds the ordered entries, each pointing at a work
//! unit by id.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension, Transaction};

use super::utils::{id_column, minutes_column, parse_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{AllocatedSlice, AllocationUpdate, DailyAllocation, PlanMode, SliceOutcome},
};

const ALLOCATION_COLUMNS: &str =
    "date, mode, total_minutes, capacity_minutes, completed_minutes, created_at, updated_at";
const SELECT_ALLOCATION_SQL: &str = "SELECT date, mode, total_minutes, capacity_minutes, completed_minutes, created_at, updated_at FROM allocations WHERE date = ?1";
const SELECT_SLICES_SQL: &str = "SELECT work_unit_id, minutes, outcome FROM allocation_slices WHERE date = ?1 ORDER BY position";
const DELETE_ALLOCATION_SQL: &str = "DELETE FROM allocations WHERE date = ?1";
const DELETE_SLICES_SQL: &str = "DELETE FROM allocation_slices WHERE date = ?1";
const INSERT_ALLOCATION_SQL: &str = "INSERT INTO allocations (date, mode, total_minutes, capacity_minutes, completed_minutes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const INSERT_SLICE_SQL: &str = "INSERT INTO allocation_slices (date, position, work_unit_id, minutes, outcome) VALUES (?1, ?2, ?3, ?4, ?5)";
const NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM allocation_slices WHERE date = ?1";
const UPDATE_SLICE_OUTCOME_SQL: &str =
    "UPDATE allocation_slices SET outcome = ?1 WHERE date = ?2 AND work_unit_id = ?3";
const REFRESH_TOTALS_SQL: &str = "UPDATE allocations SET total_minutes = (SELECT COALESCE(SUM(minutes), 0) FROM allocation_slices WHERE date = ?1), capacity_minutes = capacity_minutes + ?2, updated_at = ?3 WHERE date = ?1";
const RECORD_OUTCOME_SQL: &str = "UPDATE allocations SET completed_minutes = (SELECT COALESCE(SUM(minutes), 0) FROM allocation_slices WHERE date = ?1 AND outcome = 'completed'), updated_at = ?2 WHERE date = ?1";

impl super::Database {
    /// Helper function to construct an allocation header (without entries)
    fn build_allocation_from_row(row: &rusqlite::Row) -> rusqlite::Result<DailyAllocation> {
        Ok(DailyAllocation {
            date: parse_column::<Date>(row, 0)?,
            mode: parse_column::<PlanMode>(row, 1)?,
            slices: Vec::new(),
            total_minutes: minutes_column(row, 2)?,
            capacity_minutes: minutes_column(row, 3)?,
            completed_minutes: row.get::<_, Option<i64>>(4)?.map(|m| m.max(0) as u32),
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
        })
    }

    fn get_allocation_slices(&self, date: Date) -> Result<Vec<AllocatedSlice>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SLICES_SQL)
            .db_context("Failed to prepare query")?;

        let slices = stmt
            .query_map(params![date.to_string()], |row| {
                Ok(AllocatedSlice {
                    work_unit_id: id_column(row, 0)?,
                    minutes: minutes_column(row, 1)?,
                    outcome: parse_column::<SliceOutcome>(row, 2)?,
                })
            })
            .db_context("Failed to query allocation slices")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch allocation slices")?;

        Ok(slices)
    }

    /// Retrieves the allocation for a date, with its entries.
    pub fn get_allocation(&self, date: Date) -> Result<Option<DailyAllocation>> {
        let mut allocation = self
            .connection
            .query_row(
                SELECT_ALLOCATION_SQL,
                params![date.to_string()],
                Self::build_allocation_from_row,
            )
            .optional()
            .db_context("Failed to query allocation")?;

        if let Some(ref mut allocation) = allocation {
            allocation.slices = self.get_allocation_slices(date)?;
        }

        Ok(allocation)
    }

    /// Stores an allocation, replacing any record for the same date.
    pub fn save_allocation(&mut self, record: &DailyAllocation) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let date = record.date.to_string();
        tx.execute(DELETE_SLICES_SQL, params![&date])
            .db_context("Failed to clear allocation slices")?;
        tx.execute(DELETE_ALLOCATION_SQL, params![&date])
            .db_context("Failed to clear allocation")?;

        tx.execute(
            INSERT_ALLOCATION_SQL,
            params![
                &date,
                record.mode.as_str(),
                record.total_minutes,
                record.capacity_minutes,
                record.completed_minutes,
                record.created_at.to_string(),
                record.updated_at.to_string()
            ],
        )
        .db_context("Failed to insert allocation")?;

        insert_slices(&tx, &date, 0, &record.slices)?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Appends entries, grows capacity, and records an outcome. Returns
    /// `None` when the date has no allocation.
    pub fn update_allocation(
        &mut self,
        date: Date,
        update: &AllocationUpdate,
    ) -> Result<Option<DailyAllocation>> {
        if self.get_allocation(date)?.is_none() {
            return Ok(None);
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let date_str = date.to_string();
        let now = Timestamp::now().to_string();

        if !update.append.is_empty() {
            let next: i64 = tx
                .query_row(NEXT_POSITION_SQL, params![&date_str], |row| row.get(0))
                .db_context("Failed to get next slice position")?;
            insert_slices(&tx, &date_str, next, &update.append)?;
        }

        tx.execute(
            REFRESH_TOTALS_SQL,
            params![&date_str, update.extra_capacity, &now],
        )
        .db_context("Failed to update allocation totals")?;

        if let Some((work_unit_id, outcome)) = update.outcome {
            tx.execute(
                UPDATE_SLICE_OUTCOME_SQL,
                params![outcome.as_str(), &date_str, work_unit_id as i64],
            )
            .db_context("Failed to update slice outcome")?;
            tx.execute(RECORD_OUTCOME_SQL, params![&date_str, &now])
                .db_context("Failed to record allocation outcome")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_allocation(date)
    }

    /// Removes the allocation for a date. Returns whether one existed.
    pub fn delete_allocation(&mut self, date: Date) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let date = date.to_string();
        tx.execute(DELETE_SLICES_SQL, params![&date])
            .db_context("Failed to delete allocation slices")?;
        let rows_affected = tx
            .execute(DELETE_ALLOCATION_SQL, params![&date])
            .db_context("Failed to delete allocation")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(rows_affected > 0)
    }

    /// Every allocation with a recorded completion outcome, oldest first.
    pub fn allocations_with_outcomes(&self) -> Result<Vec<DailyAllocation>> {
        let query = format!(
            "SELECT {ALLOCATION_COLUMNS} FROM allocations WHERE completed_minutes IS NOT NULL ORDER BY date"
        );
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let mut allocations = stmt
            .query_map([], Self::build_allocation_from_row)
            .db_context("Failed to query allocations")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch allocations")?;

        for allocation in &mut allocations {
            allocation.slices = self.get_allocation_slices(allocation.date)?;
        }

        Ok(allocations)
    }
}

fn insert_slices(
    tx: &Transaction,
    date: &str,
    first_position: i64,
    slices: &[AllocatedSlice],
) -> Result<()> {
    for (offset, slice) in slices.iter().enumerate() {
        tx.execute(
            INSERT_SLICE_SQL,
            params![
                date,
                first_position + offset as i64,
                slice.work_unit_id as i64,
                slice.minutes,
                slice.outcome.as_str()
            ],
        )
        .db_context("Failed to insert allocation slice")?;
    }
    Ok(())
}
