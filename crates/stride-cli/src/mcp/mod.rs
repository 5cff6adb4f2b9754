//! MCP server implementation for Stride
//!
//! Exposes goal management, daily planning, and feasibility checks as
//! Model Context Protocol tools over stdio.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use stride_core::Planner;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddMoreSlices, AddTask, AddWorkUnit, AssessFeasibility, CreateGoal, DeleteGoal, GeneratePlan,
    Id, ListGoals, McpResult, ShowPlan, SliceRef, SuggestTargetDate, UpdateGoal,
};

/// MCP server for Stride
#[derive(Clone)]
pub struct StrideMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl StrideMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_goal",
        description = "Create a goal. Provide a title and either a target_date (YYYY-MM-DD) or lifelong=true for open-ended goals. Returns the new goal ID for adding tasks."
    )]
    async fn create_goal(&self, params: Parameters<CreateGoal>) -> McpResult {
        self.handlers().create_goal(params).await
    }

    #[tool(
        name = "list_goals",
        description = "List goals with progress. Defaults to active goals; pass status (active/paused/completed) or all=true to widen the filter."
    )]
    async fn list_goals(&self, params: Parameters<ListGoals>) -> McpResult {
        self.handlers().list_goals(params).await
    }

    #[tool(
        name = "show_goal",
        description = "Show a goal with its tasks and work units, including estimated and completed minutes."
    )]
    async fn show_goal(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_goal(params).await
    }

    #[tool(
        name = "update_goal",
        description = "Change a goal's status or target date. Use clear_target_date=true to make the goal lifelong."
    )]
    async fn update_goal(&self, params: Parameters<UpdateGoal>) -> McpResult {
        self.handlers().update_goal(params).await
    }

    #[tool(
        name = "delete_goal",
        description = "Delete a goal together with its tasks and work units. Requires confirmed=true."
    )]
    async fn delete_goal(&self, params: Parameters<DeleteGoal>) -> McpResult {
        self.handlers().delete_goal(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a task to a goal. Tasks group work units and are planned in the order they were added."
    )]
    async fn add_task(&self, params: Parameters<AddTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "add_work_unit",
        description = "Add a work unit to a task with an estimate in minutes, an optional kind (study/practice/build/review/explore), a first action and a success signal."
    )]
    async fn add_work_unit(&self, params: Parameters<AddWorkUnit>) -> McpResult {
        self.handlers().add_work_unit(params).await
    }

    #[tool(
        name = "show_work_unit",
        description = "Show a single work unit with its progress, first action and success signal."
    )]
    async fn show_work_unit(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_work_unit(params).await
    }

    #[tool(
        name = "today",
        description = "Return the stored plan for a day (default today), generating one first if none exists."
    )]
    async fn today(&self, params: Parameters<GeneratePlan>) -> McpResult {
        self.handlers().today(params).await
    }

    #[tool(
        name = "generate_daily_plan",
        description = "Build a plan of time-boxed slices for a day (default today). Mode light/medium/focus sets slice size. Replaces any stored plan for that day."
    )]
    async fn generate_daily_plan(&self, params: Parameters<GeneratePlan>) -> McpResult {
        self.handlers().generate_daily_plan(params).await
    }

    #[tool(
        name = "regenerate_daily_plan",
        description = "Discard the stored plan for a day and build a fresh one, optionally in a different mode."
    )]
    async fn regenerate_daily_plan(&self, params: Parameters<GeneratePlan>) -> McpResult {
        self.handlers().regenerate_daily_plan(params).await
    }

    #[tool(
        name = "add_more_slices",
        description = "Add slices to a day's plan using extra_minutes of additional time. Work units already planned that day are not repeated."
    )]
    async fn add_more_slices(&self, params: Parameters<AddMoreSlices>) -> McpResult {
        self.handlers().add_more_slices(params).await
    }

    #[tool(
        name = "show_daily_plan",
        description = "Show the stored plan for a day without generating one."
    )]
    async fn show_daily_plan(&self, params: Parameters<ShowPlan>) -> McpResult {
        self.handlers().show_daily_plan(params).await
    }

    #[tool(
        name = "complete_slice",
        description = "Mark a planned slice as done. Its minutes count toward the work unit, task and goal."
    )]
    async fn complete_slice(&self, params: Parameters<SliceRef>) -> McpResult {
        self.handlers().complete_slice(params).await
    }

    #[tool(
        name = "skip_slice",
        description = "Mark a planned slice as skipped. No progress is recorded."
    )]
    async fn skip_slice(&self, params: Parameters<SliceRef>) -> McpResult {
        self.handlers().skip_slice(params).await
    }

    #[tool(
        name = "estimate_capacity",
        description = "Estimate daily capacity in minutes from recent plan outcomes."
    )]
    async fn estimate_capacity(&self) -> McpResult {
        self.handlers().estimate_capacity().await
    }

    #[tool(
        name = "assess_feasibility",
        description = "Check whether total_minutes of work fits before target_date alongside existing goals. Suggests a later date when it does not."
    )]
    async fn assess_feasibility(&self, params: Parameters<AssessFeasibility>) -> McpResult {
        self.handlers().assess_feasibility(params).await
    }

    #[tool(
        name = "suggest_target_date",
        description = "Suggest a realistic target date for total_minutes of new work given current capacity and commitments."
    )]
    async fn suggest_target_date(&self, params: Parameters<SuggestTargetDate>) -> McpResult {
        self.handlers().suggest_target_date(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for StrideMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "stride".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Stride turns long-running goals into small daily slices of work.

## Core Concepts
- **Goals**: Outcomes with a target date or lifelong, each active, paused or completed
- **Tasks**: Ordered groups of work inside a goal
- **Work units**: Estimated pieces of work with a kind, a first action and a success signal
- **Slices**: Time-boxed portions of a work unit scheduled into a daily plan

## Daily Loop
1. Call `today` to get the day's plan (it is generated on first use)
2. Work through slices and report each with `complete_slice` or `skip_slice`
3. Use `add_more_slices` when extra time opens up, or `regenerate_daily_plan` to start over

## Planning Ahead
- Use `assess_feasibility` before committing to a target date
- Use `suggest_target_date` to pick one from estimated capacity
- `estimate_capacity` reports the minutes per day learned from past plans

## Tool Categories
- **Goals**: create_goal, list_goals, show_goal, update_goal, delete_goal, add_task, add_work_unit, show_work_unit
- **Plans**: today, generate_daily_plan, regenerate_daily_plan, add_more_slices, show_daily_plan, complete_slice, skip_slice
- **Capacity**: estimate_capacity, assess_feasibility, suggest_target_date"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: StrideMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Stride MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
