//! Daily plan operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    engine::{self, SliceResult},
    error::Result,
    models::{DailyPlan, GeneratedPlan},
    params::{AddMoreSlices, GeneratePlan, ShowPlan, SliceRef},
};

impl Planner {
    /// Builds and stores the plan for a date, replacing any stored plan.
    pub async fn generate_daily_plan(&self, params: &GeneratePlan) -> Result<GeneratedPlan> {
        let (date, mode) = params.validate()?;
        let config = self.config.clone();
        self.with_database_and_rng(move |db, rng| {
            engine::generate_daily_plan(db, date, mode, &config, rng)
        })
        .await
    }

    /// Discards the stored plan for a date and builds a fresh one.
    pub async fn regenerate_daily_plan(&self, params: &GeneratePlan) -> Result<GeneratedPlan> {
        let (date, mode) = params.validate()?;
        let config = self.config.clone();
        self.with_database_and_rng(move |db, rng| {
            engine::regenerate_daily_plan(db, date, mode, &config, rng)
        })
        .await
    }

    /// Returns the stored plan for a date, generating one if none exists.
    pub async fn plan_for_day(&self, params: &GeneratePlan) -> Result<DailyPlan> {
        let (date, mode) = params.validate()?;
        let config = self.config.clone();
        self.with_database_and_rng(move |db, rng| {
            if let Some(plan) = engine::load_daily_plan(&*db, date)? {
                return Ok(plan);
            }
            info!("No plan stored for {date}; generating one");
            Ok(engine::generate_daily_plan(db, date, mode, &config, rng)?.plan)
        })
        .await
    }

    /// Appends slices worth up to `extra_minutes` to a day's plan.
    ///
    /// A day without a stored plan starts from an empty plan in the requested
    /// mode.
    pub async fn add_more_slices(&self, params: &AddMoreSlices) -> Result<DailyPlan> {
        let (date, mode) = params.validate()?;
        let extra_minutes = params.extra_minutes;
        let config = self.config.clone();
        self.with_database_and_rng(move |db, rng| {
            let existing = engine::load_daily_plan(&*db, date)?
                .unwrap_or_else(|| DailyPlan::empty(date, mode, 0));
            engine::add_more_slices(db, &existing, extra_minutes, &config, rng)
        })
        .await
    }

    /// Reads back the stored plan for a date.
    pub async fn daily_plan(&self, params: &ShowPlan) -> Result<Option<DailyPlan>> {
        let date = params.validate()?;
        self.with_database(move |db| engine::load_daily_plan(&*db, date))
            .await
    }

    /// Marks a slice done and records its minutes as progress.
    pub async fn complete_slice(&self, params: &SliceRef) -> Result<SliceResult> {
        let date = params.validate()?;
        let work_unit_id = params.work_unit_id;
        self.with_database(move |db| engine::complete_slice(db, date, work_unit_id))
            .await
    }

    /// Marks a slice skipped.
    pub async fn skip_slice(&self, params: &SliceRef) -> Result<SliceResult> {
        let date = params.validate()?;
        let work_unit_id = params.work_unit_id;
        self.with_database(move |db| engine::skip_slice(db, date, work_unit_id))
            .await
    }

    /// Estimated sustainable minutes per day from recorded history.
    pub async fn estimate_capacity(&self) -> Result<u32> {
        let config = self.config.clone();
        self.with_database(move |db| engine::estimate_daily_capacity(&*db, &config))
            .await
    }
}
