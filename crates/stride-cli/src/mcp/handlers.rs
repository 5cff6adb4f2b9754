//! MCP tool handler implementations
//!
//! Every handler locks the shared planner, runs one operation, and returns
//! the same markdown the CLI renders.

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use stride_core::{
    display::{CreateResult, OperationStatus},
    params as core, Planner,
};
use tokio::sync::Mutex;

use super::errors::{not_found, to_mcp_error};
use crate::cli::goal_list_title;

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types stay free of MCP concerns. This transparent wrapper
// forwards deserialization and schema generation to the wrapped type.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateGoal = McpParams<core::CreateGoal>;
pub type ListGoals = McpParams<core::ListGoals>;
pub type UpdateGoal = McpParams<core::UpdateGoal>;
pub type DeleteGoal = McpParams<core::DeleteGoal>;
pub type AddTask = McpParams<core::AddTask>;
pub type AddWorkUnit = McpParams<core::AddWorkUnit>;
pub type GeneratePlan = McpParams<core::GeneratePlan>;
pub type AddMoreSlices = McpParams<core::AddMoreSlices>;
pub type ShowPlan = McpParams<core::ShowPlan>;
pub type SliceRef = McpParams<core::SliceRef>;
pub type AssessFeasibility = McpParams<core::AssessFeasibility>;
pub type SuggestTargetDate = McpParams<core::SuggestTargetDate>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    // ------------------------------------------------------------------
    // Goals, tasks, work units
    // ------------------------------------------------------------------

    pub async fn create_goal(&self, Parameters(params): Parameters<CreateGoal>) -> McpResult {
        debug!("create_goal: {params:?}");
        let goal = self
            .planner
            .lock()
            .await
            .create_goal(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create goal", &e))?;
        text(CreateResult::new(goal).to_string())
    }

    pub async fn list_goals(&self, Parameters(params): Parameters<ListGoals>) -> McpResult {
        debug!("list_goals: {params:?}");
        let inner_params = params.as_ref();
        let summaries = self
            .planner
            .lock()
            .await
            .list_goals_summary(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to list goals", &e))?;

        let title = goal_list_title(inner_params, summaries.is_empty());
        text(format!("# {title}\n\n{summaries}"))
    }

    pub async fn show_goal(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_goal: {params:?}");
        let goal = self
            .planner
            .lock()
            .await
            .get_goal(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get goal", &e))?
            .ok_or_else(|| not_found("Goal", params.as_ref().id))?;
        text(goal.to_string())
    }

    pub async fn update_goal(&self, Parameters(params): Parameters<UpdateGoal>) -> McpResult {
        debug!("update_goal: {params:?}");
        let result = self
            .planner
            .lock()
            .await
            .update_goal_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update goal", &e))?;
        text(result.to_string())
    }

    pub async fn delete_goal(&self, Parameters(params): Parameters<DeleteGoal>) -> McpResult {
        debug!("delete_goal: {params:?}");
        let deleted = self
            .planner
            .lock()
            .await
            .delete_goal(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete goal", &e))?
            .ok_or_else(|| not_found("Goal", params.as_ref().id))?;
        text(deleted.to_string())
    }

    pub async fn add_task(&self, Parameters(params): Parameters<AddTask>) -> McpResult {
        debug!("add_task: {params:?}");
        let task = self
            .planner
            .lock()
            .await
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;
        text(CreateResult::new(task).to_string())
    }

    pub async fn add_work_unit(&self, Parameters(params): Parameters<AddWorkUnit>) -> McpResult {
        debug!("add_work_unit: {params:?}");
        let unit = self
            .planner
            .lock()
            .await
            .add_work_unit(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add work unit", &e))?;
        text(CreateResult::new(unit).to_string())
    }

    pub async fn show_work_unit(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_work_unit: {params:?}");
        let unit = self
            .planner
            .lock()
            .await
            .get_work_unit(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get work unit", &e))?;
        text(unit.to_string())
    }

    // ------------------------------------------------------------------
    // Daily plans
    // ------------------------------------------------------------------

    pub async fn today(&self, Parameters(params): Parameters<GeneratePlan>) -> McpResult {
        debug!("today: {params:?}");
        let plan = self
            .planner
            .lock()
            .await
            .plan_for_day(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load the day's plan", &e))?;
        text(plan.to_string())
    }

    pub async fn generate_daily_plan(
        &self,
        Parameters(params): Parameters<GeneratePlan>,
    ) -> McpResult {
        debug!("generate_daily_plan: {params:?}");
        let generated = self
            .planner
            .lock()
            .await
            .generate_daily_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate plan", &e))?;
        text(generated.to_string())
    }

    pub async fn regenerate_daily_plan(
        &self,
        Parameters(params): Parameters<GeneratePlan>,
    ) -> McpResult {
        debug!("regenerate_daily_plan: {params:?}");
        let generated = self
            .planner
            .lock()
            .await
            .regenerate_daily_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to regenerate plan", &e))?;
        text(generated.to_string())
    }

    pub async fn add_more_slices(
        &self,
        Parameters(params): Parameters<AddMoreSlices>,
    ) -> McpResult {
        debug!("add_more_slices: {params:?}");
        let plan = self
            .planner
            .lock()
            .await
            .add_more_slices(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add slices", &e))?;
        text(plan.to_string())
    }

    pub async fn show_daily_plan(&self, Parameters(params): Parameters<ShowPlan>) -> McpResult {
        debug!("show_daily_plan: {params:?}");
        let inner_params = params.as_ref();
        let plan = self
            .planner
            .lock()
            .await
            .daily_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to load plan", &e))?;

        match plan {
            Some(plan) => text(plan.to_string()),
            None => {
                let day = inner_params.date.as_deref().unwrap_or("today");
                text(
                    OperationStatus::failure(format!(
                        "No plan stored for {day}. Use 'generate_daily_plan' to build one."
                    ))
                    .to_string(),
                )
            }
        }
    }

    pub async fn complete_slice(&self, Parameters(params): Parameters<SliceRef>) -> McpResult {
        debug!("complete_slice: {params:?}");
        let result = self
            .planner
            .lock()
            .await
            .complete_slice(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to complete slice", &e))?;
        text(result.to_string())
    }

    pub async fn skip_slice(&self, Parameters(params): Parameters<SliceRef>) -> McpResult {
        debug!("skip_slice: {params:?}");
        let result = self
            .planner
            .lock()
            .await
            .skip_slice(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to skip slice", &e))?;
        text(result.to_string())
    }

    // ------------------------------------------------------------------
    // Capacity and feasibility
    // ------------------------------------------------------------------

    pub async fn estimate_capacity(&self) -> McpResult {
        debug!("estimate_capacity");
        let minutes = self
            .planner
            .lock()
            .await
            .estimate_capacity()
            .await
            .map_err(|e| to_mcp_error("Failed to estimate capacity", &e))?;
        text(
            OperationStatus::success(format!("Estimated capacity: {minutes} minutes per day"))
                .to_string(),
        )
    }

    pub async fn assess_feasibility(
        &self,
        Parameters(params): Parameters<AssessFeasibility>,
    ) -> McpResult {
        debug!("assess_feasibility: {params:?}");
        let report = self
            .planner
            .lock()
            .await
            .assess_feasibility(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to assess feasibility", &e))?;
        text(report.to_string())
    }

    pub async fn suggest_target_date(
        &self,
        Parameters(params): Parameters<SuggestTargetDate>,
    ) -> McpResult {
        debug!("suggest_target_date: {params:?}");
        let suggestion = self
            .planner
            .lock()
            .await
            .suggest_target_date(params.as_ref())
            .await;
        text(suggestion.to_string())
    }
}
