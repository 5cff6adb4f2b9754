//! Ranking of outstanding work units across active goals.
//!
//! Score = base + urgency tier bonus + random jitter. Staleness (time since a
//! work unit was last touched) is not tracked; the jitter is what keeps
//! equally urgent work from starving.

use std::collections::HashMap;

use jiff::civil::Date;
use log::debug;
use rand::Rng;

use super::EngineConfig;
use crate::{
    models::{Goal, GoalStatus, Task, WorkUnit},
    store::WorkSnapshot,
};

/// A work unit eligible for today's plan, with its resolved parents.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub work_unit: WorkUnit,
    pub task: Task,
    pub goal: Goal,
    pub score: u32,
}

/// Bonus for a goal's target date as seen from `on`.
///
/// Overdue targets fall in the nearest tier.
///
/// ```rust
/// use jiff::civil::date;
/// use stride_core::engine::{prioritizer::urgency_bonus, EngineConfig};
///
/// let config = EngineConfig::default();
/// let today = date(2025, 5, 1);
/// assert_eq!(urgency_bonus(Some(date(2025, 5, 6)), today, &config), 30);
/// assert_eq!(urgency_bonus(Some(date(2025, 5, 12)), today, &config), 20);
/// assert_eq!(urgency_bonus(Some(date(2025, 5, 25)), today, &config), 10);
/// assert_eq!(urgency_bonus(Some(date(2025, 9, 1)), today, &config), 0);
/// assert_eq!(urgency_bonus(None, today, &config), 0);
/// ```
pub fn urgency_bonus(target: Option<Date>, on: Date, config: &EngineConfig) -> u32 {
    let Some(target) = target else {
        return 0;
    };
    let days = on.until(target).map(|span| span.get_days()).unwrap_or(i32::MAX);
    config
        .urgency_tiers
        .iter()
        .find(|tier| days <= tier.within_days)
        .map_or(0, |tier| tier.bonus)
}

/// Rank every incomplete work unit under an active goal, highest score
/// first.
///
/// Work units whose task or goal cannot be resolved are dropped silently.
/// Equal scores keep snapshot order.
pub fn prioritize_work_units<R: Rng>(
    snapshot: &WorkSnapshot,
    on: Date,
    config: &EngineConfig,
    rng: &mut R,
) -> Vec<Candidate> {
    let goals: HashMap<u64, &Goal> = snapshot.goals.iter().map(|g| (g.id, g)).collect();
    let tasks: HashMap<u64, &Task> = snapshot.tasks.iter().map(|t| (t.id, t)).collect();

    let mut candidates: Vec<Candidate> = snapshot
        .work_units
        .iter()
        .filter(|wu| !wu.is_complete())
        .filter_map(|wu| {
            let Some(task) = tasks.get(&wu.task_id) else {
                debug!("Work unit {} has no task; excluded", wu.id);
                return None;
            };
            let Some(goal) = goals.get(&task.goal_id) else {
                debug!("Work unit {} has no goal; excluded", wu.id);
                return None;
            };
            if goal.status != GoalStatus::Active {
                return None;
            }

            let jitter = rng.random_range(0..=config.max_jitter);
            let score = config.base_score + urgency_bonus(goal.target_date, on, config) + jitter;
            Some(Candidate {
                work_unit: wu.clone(),
                task: (*task).clone(),
                goal: (*goal).clone(),
                score,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}
