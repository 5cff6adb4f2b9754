//! Feasibility operations for the Planner.
//!
//! Neither operation fails on a data store problem: capacity falls back to
//! the configured default and the concurrent-goal count to zero.

use log::warn;

use super::Planner;
use crate::{
    engine,
    error::Result,
    models::{FeasibilityReport, TargetSuggestion},
    params::{today, AssessFeasibility, SuggestTargetDate},
};

impl Planner {
    /// Checks whether an amount of work fits before a target date.
    ///
    /// Only a malformed target date is an error.
    pub async fn assess_feasibility(&self, params: &AssessFeasibility) -> Result<FeasibilityReport> {
        let target = params.validate()?;
        let capacity = self.capacity_or_default().await;
        Ok(engine::assess_feasibility(
            params.total_minutes,
            target,
            capacity,
            today(),
            &self.config,
        ))
    }

    /// Proposes a target date for a new goal sharing capacity with the
    /// active ones.
    pub async fn suggest_target_date(&self, params: &SuggestTargetDate) -> TargetSuggestion {
        let capacity = self.capacity_or_default().await;
        let exclude = params.exclude_goal_id;
        let others = self
            .with_database(move |db| db.count_active_goals(exclude))
            .await
            .unwrap_or_else(|e| {
                warn!("Could not count active goals, assuming none: {e}");
                0
            });

        engine::suggest_target_date(params.total_minutes, others, capacity, today(), &self.config)
    }

    async fn capacity_or_default(&self) -> u32 {
        self.estimate_capacity().await.unwrap_or_else(|e| {
            warn!(
                "Capacity estimation failed, using default of {} minutes: {e}",
                self.config.default_capacity
            );
            self.config.default_capacity
        })
    }
}
