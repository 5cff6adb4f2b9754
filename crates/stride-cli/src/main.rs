//! Stride CLI Application
//!
//! Command-line interface and MCP server for the Stride daily planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, StrideMcpServer};
use renderer::TerminalRenderer;
use stride_core::{params::GeneratePlan, PlannerBuilder};
use Commands::Serve;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        seed,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_seed(seed)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Stride started");

    match command {
        Some(Serve) => {
            info!("Starting Stride MCP server");
            run_stdio_server(StrideMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        Some(command) => Cli::new(planner, renderer).run(command).await,
        None => {
            Cli::new(planner, renderer)
                .today(&GeneratePlan::default())
                .await
        }
    }
}
