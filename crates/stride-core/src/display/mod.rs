//! Display formatting for domain models and operation results.
//!
//! Domain models implement `Display` directly; collections and operation
//! outcomes go through small wrapper types. Everything renders as markdown,
//! which the CLI passes through its terminal renderer and the MCP server
//! returns as text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │   Formatted     │
//! │ (Goal, Plan...) │───▶│ & Result Types  │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (GoalSummaries)
//! - [`results`]: Operation results (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: One-line confirmations (OperationStatus)
//! - [`datetime`]: Local timestamp formatting
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage
//!
//! ```rust
//! use stride_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Plan stored");
//! assert_eq!(status.to_string(), "Success: Plan stored\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::GoalSummaries;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
