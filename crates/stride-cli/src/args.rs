use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    FeasibilityCommands, GoalCommands, PlanCommands, SliceCommands, TaskCommands, TodayArgs,
    UnitCommands,
};

/// Stride: a sustainable daily planner for long-running personal goals
///
/// Break goals into tasks and work units, then let Stride pick a small,
/// bounded set of time slices to work on each day. Run without a command to
/// see today's plan. The `serve` command exposes the same operations over MCP
/// (Model Context Protocol) for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "stride")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stride/stride.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Seed the random source so generated plans are reproducible
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Stride CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage goals
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Manage tasks within goals
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage work units within tasks
    #[command(alias = "u")]
    Unit {
        #[command(subcommand)]
        command: UnitCommands,
    },
    /// Show today's plan, generating it if needed
    Today(TodayArgs),
    /// Generate, extend, and show daily plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Record what happened to a planned slice
    #[command(alias = "s")]
    Slice {
        #[command(subcommand)]
        command: SliceCommands,
    },
    /// Check target dates against your capacity
    #[command(alias = "f")]
    Feasibility {
        #[command(subcommand)]
        command: FeasibilityCommands,
    },
    /// Show the estimated daily capacity
    Capacity,
    /// Start the MCP server
    Serve,
}
