//! Daily plan assembly: greedy, bounded selection of slices.
//!
//! A plan is built by walking the ranked candidates once:
//!
//! 1. stop at the cognitive limit or when capacity is used up;
//! 2. when there are more candidates than the cognitive limit, take at most
//!    one slice per task;
//! 3. skip (never truncate) a slice that does not fit the remaining budget,
//!    even while the plan is still empty;
//! 4. if nothing was chosen but work exists, force one light slice from the
//!    top candidate, even past capacity.
//!
//! The chosen plan overwrites the date's allocation record.

use std::collections::HashMap;

use jiff::civil::Date;
use log::{debug, info};
use rand::Rng;

use super::{
    capacity::estimate_daily_capacity,
    prioritizer::{prioritize_work_units, Candidate},
    slicer::generate_slice,
    EngineConfig,
};
use crate::{
    error::Result,
    models::{
        AllocationUpdate, DailyAllocation, DailyPlan, GeneratedPlan, Goal, PlanMetadata, PlanMode,
        Slice, Task, WorkUnit,
    },
    store::{AllocationStore, WorkRepository},
};

/// Status line when there is nothing to plan.
pub const NO_WORK_MESSAGE: &str = "No tasks available right now.";

/// Build, persist, and return the plan for `date`.
///
/// An empty goal set or candidate pool is not an error: the result is an
/// empty plan with a neutral message. Store failures propagate.
pub fn generate_daily_plan<S, R>(
    store: &mut S,
    date: Date,
    mode: PlanMode,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<GeneratedPlan>
where
    S: WorkRepository + AllocationStore + ?Sized,
    R: Rng,
{
    let capacity = estimate_daily_capacity(store, config)?;
    let snapshot = store.snapshot()?;
    let candidates = prioritize_work_units(&snapshot, date, config, rng);

    let plan = assemble_plan(&candidates, date, mode, capacity, config, rng);
    store.create(&DailyAllocation::from_plan(&plan))?;
    info!(
        "Planned {} slices ({} of {} min) for {date}",
        plan.len(),
        plan.total_minutes,
        capacity
    );

    let metadata = PlanMetadata {
        candidate_count: candidates.len(),
        selected_count: plan.len(),
        capacity_minutes: capacity,
        used_minutes: plan.total_minutes,
        message: plan_message(&plan),
    };
    Ok(GeneratedPlan { plan, metadata })
}

/// Drop the date's allocation and build a fresh one.
pub fn regenerate_daily_plan<S, R>(
    store: &mut S,
    date: Date,
    mode: PlanMode,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<GeneratedPlan>
where
    S: WorkRepository + AllocationStore + ?Sized,
    R: Rng,
{
    if store.delete(date)? {
        info!("Discarded existing plan for {date}");
    }
    generate_daily_plan(store, date, mode, config, rng)
}

/// Greedy selection over ranked candidates. Pure apart from `rng`.
pub fn assemble_plan<R: Rng>(
    candidates: &[Candidate],
    date: Date,
    mode: PlanMode,
    capacity: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> DailyPlan {
    let mut plan = DailyPlan::empty(date, mode, capacity);
    let one_per_task = candidates.len() > config.cognitive_limit;

    for candidate in candidates {
        if plan.len() >= config.cognitive_limit || plan.total_minutes >= capacity {
            break;
        }
        if one_per_task && plan.contains_task(candidate.task.id) {
            debug!(
                "Skipping work unit {}: task {} already planned",
                candidate.work_unit.id, candidate.task.id
            );
            continue;
        }
        let Some(slice) = slice_for(candidate, mode, rng) else {
            continue;
        };
        // An empty plan gets no exemption here. Step 4 fills it with a
        // light slice instead of an oversized one.
        if plan.total_minutes + slice.minutes > capacity {
            debug!(
                "Skipping work unit {}: {} min does not fit {} min left",
                candidate.work_unit.id,
                slice.minutes,
                plan.unused_minutes()
            );
            continue;
        }
        plan.push(slice);
    }

    if plan.is_empty() {
        if let Some(slice) = candidates
            .first()
            .and_then(|top| slice_for(top, PlanMode::Light, rng))
        {
            debug!(
                "Nothing fit {capacity} min; forcing a {} min light slice",
                slice.minutes
            );
            plan.push(slice);
        }
    }

    plan
}

/// Append new slices worth up to `extra_minutes` to an existing plan and
/// persist them.
///
/// Work units already in the plan are excluded. The per-task rule and the
/// cognitive limit are not re-applied to the merged plan. If nothing fits
/// but work exists, one light slice is forced.
pub fn add_more_slices<S, R>(
    store: &mut S,
    existing: &DailyPlan,
    extra_minutes: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<DailyPlan>
where
    S: WorkRepository + AllocationStore + ?Sized,
    R: Rng,
{
    let snapshot = store.snapshot()?;
    let candidates = prioritize_work_units(&snapshot, existing.date, config, rng);

    let mut plan = existing.clone();
    let added = extend_plan(&mut plan, &candidates, extra_minutes, rng);
    plan.capacity_minutes = plan.capacity_minutes.saturating_add(extra_minutes);

    let update = AllocationUpdate {
        append: DailyAllocation::from_plan(&plan).slices[existing.len()..].to_vec(),
        extra_capacity: extra_minutes,
        outcome: None,
    };
    if store.update(plan.date, &update)?.is_none() {
        store.create(&DailyAllocation::from_plan(&plan))?;
    }
    info!("Added {added} slices to the plan for {}", plan.date);
    Ok(plan)
}

/// Greedily append slices within `extra_minutes`. Returns how many were
/// added.
pub fn extend_plan<R: Rng>(
    plan: &mut DailyPlan,
    candidates: &[Candidate],
    extra_minutes: u32,
    rng: &mut R,
) -> usize {
    let fresh: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| !plan.contains_work_unit(c.work_unit.id))
        .collect();

    let mode = plan.mode;
    let mut used = 0;
    let mut added = 0;
    for candidate in &fresh {
        if used >= extra_minutes {
            break;
        }
        let Some(slice) = slice_for(candidate, mode, rng) else {
            continue;
        };
        if used + slice.minutes > extra_minutes {
            continue;
        }
        used += slice.minutes;
        added += 1;
        plan.push(slice);
    }

    if added == 0 {
        if let Some(slice) = fresh
            .first()
            .and_then(|top| slice_for(top, PlanMode::Light, rng))
        {
            plan.push(slice);
            added = 1;
        }
    }
    added
}

/// Rebuild a stored plan from its allocation, using current titles.
///
/// Entries whose work unit, task, or goal no longer exists are omitted.
pub fn load_daily_plan<S>(store: &S, date: Date) -> Result<Option<DailyPlan>>
where
    S: WorkRepository + AllocationStore + ?Sized,
{
    let Some(allocation) = store.get_by_date(date)? else {
        return Ok(None);
    };
    let snapshot = store.snapshot()?;
    let goals: HashMap<u64, &Goal> = snapshot.goals.iter().map(|g| (g.id, g)).collect();
    let tasks: HashMap<u64, &Task> = snapshot.tasks.iter().map(|t| (t.id, t)).collect();
    let units: HashMap<u64, &WorkUnit> = snapshot.work_units.iter().map(|w| (w.id, w)).collect();

    let mut plan = DailyPlan::empty(date, allocation.mode, allocation.capacity_minutes);
    for entry in &allocation.slices {
        let resolved = units.get(&entry.work_unit_id).and_then(|wu| {
            let task = tasks.get(&wu.task_id)?;
            let goal = goals.get(&task.goal_id)?;
            Some((*wu, *task, *goal))
        });
        match resolved {
            Some((wu, task, goal)) => {
                let mut slice = Slice::new(wu, task, goal, entry.minutes);
                slice.outcome = entry.outcome;
                plan.push(slice);
            }
            None => debug!(
                "Work unit {} in plan for {date} no longer exists",
                entry.work_unit_id
            ),
        }
    }
    Ok(Some(plan))
}

fn slice_for<R: Rng>(candidate: &Candidate, mode: PlanMode, rng: &mut R) -> Option<Slice> {
    generate_slice(
        &candidate.work_unit,
        &candidate.task,
        &candidate.goal,
        mode,
        rng,
    )
}

fn plan_message(plan: &DailyPlan) -> String {
    match plan.len() {
        0 => NO_WORK_MESSAGE.to_string(),
        1 => format!("1 slice planned, about {} minutes.", plan.total_minutes),
        n => format!("{n} slices planned, about {} minutes.", plan.total_minutes),
    }
}
