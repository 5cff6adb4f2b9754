//! High-level planner API for goals, daily plans, and feasibility.
//!
//! This module provides the main [`Planner`] interface for Stride. The
//! planner sits between the interface layers (CLI, MCP) and the database,
//! validating parameters and running the planning engine against SQLite.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │    Operations    │    │ Engine + SQLite │
//! │ (goal_handlers) │───▶│ (goal_ops,       │───▶│ (engine/, db/)  │
//! │                 │    │  schedule_ops,   │    │                 │
//! │                 │    │  feasibility_ops)│    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//!    Display wrappers        Validation           Algorithms and
//!                                                    persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`goal_ops`]: Goals, tasks, and work units
//! - [`goal_handlers`]: Goal operations returning display wrappers
//! - [`schedule_ops`]: Daily plan generation, extension, and slice outcomes
//! - [`feasibility_ops`]: Capacity-based target date checks
//!
//! Every operation opens the database inside `spawn_blocking`, so SQLite
//! never blocks the async runtime. Operations that need randomness share
//! one generator, seeded when [`PlannerBuilder::with_seed`] is used.
//!
//! # Usage Examples
//!
//! ```rust
//! use stride_core::{params::{AddTask, AddWorkUnit, CreateGoal, GeneratePlan}, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/stride-example.db"))
//!     .with_seed(Some(7))
//!     .build()
//!     .await?;
//!
//! let goal = planner
//!     .create_goal(&CreateGoal {
//!         title: "Learn Spanish".to_string(),
//!         target_date: Some("2026-01-01".to_string()),
//!         lifelong: false,
//!     })
//!     .await?;
//! let task = planner
//!     .add_task(&AddTask { goal_id: goal.id, title: "Vocabulary".to_string() })
//!     .await?;
//! planner
//!     .add_work_unit(&AddWorkUnit {
//!         task_id: task.id,
//!         title: "First 100 words".to_string(),
//!         estimated_minutes: 120,
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let generated = planner.generate_daily_plan(&GeneratePlan::default()).await?;
//! println!("{}", generated.plan);
//! # Ok(())
//! # }
//! ```

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
};

use rand::rngs::StdRng;
use tokio::task;

use crate::{
    db::Database,
    engine::EngineConfig,
    error::{PlannerError, Result},
};

pub mod builder;
pub mod feasibility_ops;
pub mod goal_handlers;
pub mod goal_ops;
pub mod schedule_ops;


pub use builder::PlannerBuilder;

/// Main planner interface for goals and daily plans.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) config: EngineConfig,
    rng: Arc<Mutex<StdRng>>,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(db_path: PathBuf, config: EngineConfig, rng: StdRng) -> Self {
        Self {
            db_path,
            config,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// The engine constants this planner runs with.
    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open the database on a blocking thread and run `f` against it.
    pub(crate) async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }

    /// Like [`Self::with_database`], also handing out the shared random
    /// source.
    pub(crate) async fn with_database_and_rng<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database, &mut StdRng) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let rng = Arc::clone(&self.rng);
        self.with_database(move |db| {
            let mut rng = lock(&rng)?;
            f(db, &mut rng)
        })
        .await
    }
}

fn lock(rng: &Mutex<StdRng>) -> Result<MutexGuard<'_, StdRng>> {
    rng.lock().map_err(|_| PlannerError::Configuration {
        message: "Random source lock poisoned".to_string(),
    })
}
