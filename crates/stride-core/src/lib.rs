//! Core library for the Stride daily planner.
//!
//! Stride breaks long-running goals into tasks and work units, then picks a
//! small, bounded set of time slices to work on each day. This crate holds
//! everything except the user interfaces: the planning engine, SQLite
//! storage, domain models, parameter validation, and markdown display.
//!
//! # Layers
//!
//! - **Engine** ([`engine`]): synchronous scheduling logic over the
//!   collaborator traits in [`store`]
//! - **Storage** ([`db`]): the SQLite implementation of those traits
//! - **Planner** ([`planner`]): the async facade used by the CLI and the MCP
//!   server
//! - **Display** ([`display`]): markdown rendering for models and results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stride_core::{
//!     params::{AddTask, AddWorkUnit, CreateGoal, GeneratePlan},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("stride.db"))
//!     .build()
//!     .await?;
//!
//! let goal = planner
//!     .create_goal(&CreateGoal {
//!         title: "Learn Rust".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let task = planner
//!     .add_task(&AddTask {
//!         goal_id: goal.id,
//!         title: "Read the book".to_string(),
//!     })
//!     .await?;
//! planner
//!     .add_work_unit(&AddWorkUnit {
//!         task_id: task.id,
//!         title: "Chapter 4: ownership".to_string(),
//!         estimated_minutes: 90,
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let today = planner.generate_daily_plan(&GeneratePlan::default()).await?;
//! println!("{today}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod store;

pub use db::Database;
pub use display::{CreateResult, DeleteResult, GoalSummaries, OperationStatus, UpdateResult};
pub use engine::{EngineConfig, SliceResult};
pub use error::{PlannerError, Result};
pub use models::{
    DailyPlan, FeasibilityReport, GeneratedPlan, Goal, GoalStatus, GoalSummary, PlanMode, Slice,
    SliceLabel, SliceOutcome, TargetSuggestion, Task, WorkKind, WorkUnit,
};
pub use planner::{Planner, PlannerBuilder};
