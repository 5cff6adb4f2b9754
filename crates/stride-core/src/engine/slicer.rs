//! Sizing a single slice of a work unit.

use rand::Rng;

use crate::models::{Goal, PlanMode, Slice, Task, WorkUnit};

/// Minutes for the next slice: a random point in the mode's range, capped at
/// what the work unit has left. `None` once nothing remains.
pub fn slice_minutes<R: Rng>(remaining: u32, mode: PlanMode, rng: &mut R) -> Option<u32> {
    if remaining == 0 {
        return None;
    }
    let (min, max) = mode.minute_range();
    let size = min + rng.random_range(0..=max - min);
    Some(size.min(remaining))
}

/// Carve one slice out of a work unit's remaining effort.
pub fn generate_slice<R: Rng>(
    work_unit: &WorkUnit,
    task: &Task,
    goal: &Goal,
    mode: PlanMode,
    rng: &mut R,
) -> Option<Slice> {
    slice_minutes(work_unit.remaining(), mode, rng)
        .map(|minutes| Slice::new(work_unit, task, goal, minutes))
}
