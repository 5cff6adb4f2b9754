//! Recording what happened to a planned slice.
//!
//! Neither operation re-runs the scheduler. Both record the day's outcome on
//! the allocation, which turns that day into a capacity sample.

use jiff::civil::Date;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{AllocatedSlice, AllocationUpdate, SliceOutcome, WorkUnit},
    store::{AllocationStore, WorkRepository},
};

/// Result of completing or skipping a slice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliceResult {
    pub date: Date,
    /// The work unit after any progress was recorded
    pub work_unit: WorkUnit,
    pub minutes: u32,
    pub outcome: SliceOutcome,
    /// A goal reached the end of its work and was marked completed
    pub goal_completed: bool,
    /// A lifelong goal reached the end of its work and started over
    pub goal_reset: bool,
}

/// Mark a slice done: record its minutes as progress and close the entry.
///
/// When this finishes the last of a goal's work, the goal is completed, or
/// reset if it is lifelong.
pub fn complete_slice<S>(store: &mut S, date: Date, work_unit_id: u64) -> Result<SliceResult>
where
    S: WorkRepository + AllocationStore + ?Sized,
{
    let entry = pending_entry(store, date, work_unit_id)?;
    let work_unit = store.record_progress(work_unit_id, entry.minutes)?;
    set_outcome(store, date, work_unit_id, SliceOutcome::Completed)?;

    let mut result = SliceResult {
        date,
        work_unit,
        minutes: entry.minutes,
        outcome: SliceOutcome::Completed,
        goal_completed: false,
        goal_reset: false,
    };

    let goal_id = match store.task(result.work_unit.task_id)? {
        Some(task) => task.goal_id,
        None => return Ok(result),
    };
    let Some(goal) = store.goal_with_tasks(goal_id)? else {
        return Ok(result);
    };
    let mut units = goal.tasks.iter().flat_map(|t| t.work_units.iter()).peekable();
    let finished = units.peek().is_some() && units.all(WorkUnit::is_complete);
    if finished {
        if goal.lifelong {
            store.reset_goal_progress(goal.id)?;
            result.goal_reset = true;
            info!("Lifelong goal {} finished a cycle; progress reset", goal.id);
        } else {
            store.complete_goal(goal.id)?;
            result.goal_completed = true;
            info!("Goal {} completed", goal.id);
        }
    }
    Ok(result)
}

/// Mark a slice skipped. Progress is left alone.
pub fn skip_slice<S>(store: &mut S, date: Date, work_unit_id: u64) -> Result<SliceResult>
where
    S: WorkRepository + AllocationStore + ?Sized,
{
    let entry = pending_entry(store, date, work_unit_id)?;
    let work_unit = store
        .work_unit(work_unit_id)?
        .ok_or(PlannerError::WorkUnitNotFound { id: work_unit_id })?;
    set_outcome(store, date, work_unit_id, SliceOutcome::Skipped)?;

    Ok(SliceResult {
        date,
        work_unit,
        minutes: entry.minutes,
        outcome: SliceOutcome::Skipped,
        goal_completed: false,
        goal_reset: false,
    })
}

fn pending_entry<S>(store: &S, date: Date, work_unit_id: u64) -> Result<AllocatedSlice>
where
    S: AllocationStore + ?Sized,
{
    let entry = store
        .get_by_date(date)?
        .and_then(|allocation| allocation.slice(work_unit_id).copied())
        .ok_or(PlannerError::SliceNotFound { date, work_unit_id })?;
    if entry.outcome != SliceOutcome::Pending {
        return Err(PlannerError::invalid_input("work_unit_id").with_reason(format!(
            "Slice for work unit {work_unit_id} on {date} is already {}",
            entry.outcome.as_str()
        )));
    }
    Ok(entry)
}

fn set_outcome<S>(store: &mut S, date: Date, work_unit_id: u64, outcome: SliceOutcome) -> Result<()>
where
    S: AllocationStore + ?Sized,
{
    let update = AllocationUpdate {
        outcome: Some((work_unit_id, outcome)),
        ..Default::default()
    };
    store
        .update(date, &update)?
        .ok_or(PlannerError::SliceNotFound { date, work_unit_id })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        engine::{generate_daily_plan, testing::MemoryStore, EngineConfig},
        models::{GoalStatus, PlanMode},
    };

    fn day() -> Date {
        date(2025, 6, 2)
    }

    fn planned(store: &mut MemoryStore) -> Vec<(u64, u32)> {
        let mut rng = StdRng::seed_from_u64(17);
        generate_daily_plan(
            store,
            day(),
            PlanMode::Medium,
            &EngineConfig::default(),
            &mut rng,
        )
        .unwrap()
        .plan
        .slices
        .iter()
        .map(|s| (s.work_unit_id, s.minutes))
        .collect()
    }

    #[test]
    fn test_complete_records_progress() {
        let mut store = MemoryStore::default();
        let goal = store.add_goal("Spanish", None);
        let task = store.add_task(goal, "Vocabulary");
        let unit = store.add_work_unit(task, 300, 0);
        let (id, minutes) = planned(&mut store)[0];
        assert_eq!(id, unit);

        let result = complete_slice(&mut store, day(), unit).unwrap();
        assert_eq!(result.outcome, SliceOutcome::Completed);
        assert_eq!(result.work_unit.completed_minutes, minutes);
        assert!(!result.goal_completed);
        assert_eq!(store.task(task).unwrap().unwrap().completed_minutes, minutes);

        let allocation = store.get_by_date(day()).unwrap().unwrap();
        assert_eq!(allocation.slice(unit).unwrap().outcome, SliceOutcome::Completed);
        assert_eq!(allocation.completed_minutes, Some(minutes));
    }

    #[test]
    fn test_skip_leaves_progress_alone() {
        let mut store = MemoryStore::default();
        let goal = store.add_goal("Spanish", None);
        let task = store.add_task(goal, "Listening");
        let unit = store.add_work_unit(task, 300, 30);
        planned(&mut store);

        let result = skip_slice(&mut store, day(), unit).unwrap();
        assert_eq!(result.outcome, SliceOutcome::Skipped);
        assert_eq!(result.work_unit.completed_minutes, 30);

        let allocation = store.get_by_date(day()).unwrap().unwrap();
        assert_eq!(allocation.slice(unit).unwrap().outcome, SliceOutcome::Skipped);
        // skipping still counts as a recorded outcome
        assert_eq!(allocation.completed_minutes, Some(0));
        assert!(allocation.has_outcome());
    }

    #[test]
    fn test_finishing_last_unit_completes_goal() {
        let mut store = MemoryStore::default();
        let goal = store.add_goal("Read a book", None);
        let task = store.add_task(goal, "Last chapter");
        // smaller than any medium slice, so the slice is the remainder
        let unit = store.add_work_unit(task, 15, 0);
        planned(&mut store);

        let result = complete_slice(&mut store, day(), unit).unwrap();
        assert!(result.work_unit.is_complete());
        assert!(result.goal_completed);
        assert_eq!(store.goal(goal).unwrap().status, GoalStatus::Completed);
    }

    #[test]
    fn test_lifelong_goal_resets_instead() {
        let mut store = MemoryStore::default();
        let goal = store.add_goal("Stay fit", None);
        store.set_lifelong(goal);
        let task = store.add_task(goal, "Weekly run");
        let unit = store.add_work_unit(task, 15, 0);
        planned(&mut store);

        let result = complete_slice(&mut store, day(), unit).unwrap();
        assert!(result.goal_reset);
        assert!(!result.goal_completed);
        assert_eq!(store.goal(goal).unwrap().status, GoalStatus::Active);
        assert_eq!(store.work_unit(unit).unwrap().unwrap().completed_minutes, 0);
        assert_eq!(store.task(task).unwrap().unwrap().completed_minutes, 0);
    }

    #[test]
    fn test_unknown_slice() {
        let mut store = MemoryStore::default();
        let goal = store.add_goal("Goal", None);
        let task = store.add_task(goal, "Task");
        store.add_work_unit(task, 100, 0);
        planned(&mut store);

        let err = complete_slice(&mut store, day(), 9_999).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::SliceNotFound {
                work_unit_id: 9_999,
                ..
            }
        ));
        let err = skip_slice(&mut store, date(2030, 1, 1), 1_000).unwrap_err();
        assert!(matches!(err, PlannerError::SliceNotFound { .. }));
    }

    #[test]
    fn test_only_pending_slices_change() {
        let mut store = MemoryStore::default();
        let goal = store.add_goal("Goal", None);
        let task = store.add_task(goal, "Task");
        let unit = store.add_work_unit(task, 100, 0);
        planned(&mut store);

        skip_slice(&mut store, day(), unit).unwrap();
        let err = complete_slice(&mut store, day(), unit).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { .. }));
        assert_eq!(store.work_unit(unit).unwrap().unwrap().completed_minutes, 0);
    }
}
