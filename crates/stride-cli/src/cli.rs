//! Command-line argument wrappers and command handlers
//!
//! Each subcommand has a clap argument struct that converts into the matching
//! core parameter type, so clap attributes never leak into `stride-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → Display → Renderer
//! ```
//!
//! [`Cli`] runs the parsed commands against a [`Planner`] and renders the
//! markdown produced by the core display types.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use stride_core::{
    display::{CreateResult, OperationStatus},
    params::*,
    Planner,
};

use crate::{args::Commands, renderer::TerminalRenderer};

/// Heading used above a goal list, shared with the MCP server so both
/// interfaces describe the same list the same way.
pub fn goal_list_title(params: &ListGoals, empty: bool) -> String {
    let scope = if params.all {
        "All".to_string()
    } else {
        let status = params.status.as_deref().unwrap_or("active");
        let mut chars = status.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Active".to_string(),
        }
    };
    if empty && params.all {
        "No goals found".to_string()
    } else if empty {
        format!("No {} goals found", scope.to_lowercase())
    } else {
        format!("{scope} Goals")
    }
}

// ============================================================================
// Goal commands
// ============================================================================

/// Create a new goal
#[derive(Args)]
pub struct CreateGoalArgs {
    /// Title of the goal
    pub title: String,
    #[arg(short, long, help = "Date you would like to be done by (YYYY-MM-DD)")]
    pub target_date: Option<String>,
    #[arg(
        long,
        help = "Lifelong goals never complete; their progress starts over instead"
    )]
    pub lifelong: bool,
}

impl From<CreateGoalArgs> for CreateGoal {
    fn from(val: CreateGoalArgs) -> Self {
        CreateGoal {
            title: val.title,
            target_date: val.target_date,
            lifelong: val.lifelong,
        }
    }
}

/// List goals
///
/// Shows active goals by default. Use --status to pick another status or
/// --all to list every goal regardless of status.
#[derive(Args)]
pub struct ListGoalsArgs {
    #[arg(short, long, help = "Only list goals with this status")]
    pub status: Option<GoalStatusArg>,
    #[arg(short, long, conflicts_with = "status", help = "List goals of every status")]
    pub all: bool,
}

impl From<ListGoalsArgs> for ListGoals {
    fn from(val: ListGoalsArgs) -> Self {
        ListGoals {
            status: val.status.map(|s| s.to_string()),
            all: val.all,
        }
    }
}

/// Show a goal with its tasks and work units
#[derive(Args)]
pub struct ShowGoalArgs {
    #[arg(help = "Unique identifier of the goal to show")]
    pub id: u64,
}

impl From<ShowGoalArgs> for Id {
    fn from(val: ShowGoalArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change a goal's status or target date
#[derive(Args)]
pub struct UpdateGoalArgs {
    #[arg(help = "Unique identifier of the goal to update")]
    pub id: u64,
    #[arg(short, long, help = "New status for the goal")]
    pub status: Option<GoalStatusArg>,
    #[arg(short, long, help = "New target date (YYYY-MM-DD)")]
    pub target_date: Option<String>,
    #[arg(long, conflicts_with = "target_date", help = "Remove the target date")]
    pub clear_target_date: bool,
}

impl From<UpdateGoalArgs> for UpdateGoal {
    fn from(val: UpdateGoalArgs) -> Self {
        UpdateGoal {
            id: val.id,
            status: val.status.map(|s| s.to_string()),
            target_date: val.target_date,
            clear_target_date: val.clear_target_date,
        }
    }
}

/// Delete a goal with all its tasks and work units
#[derive(Args)]
pub struct DeleteGoalArgs {
    #[arg(help = "Unique identifier of the goal to delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteGoalArgs> for DeleteGoal {
    fn from(val: DeleteGoalArgs) -> Self {
        DeleteGoal {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal
    #[command(alias = "c")]
    Create(CreateGoalArgs),
    /// List goals
    #[command(aliases = ["l", "ls"])]
    List(ListGoalsArgs),
    /// Show a goal with its tasks and work units
    #[command(alias = "s")]
    Show(ShowGoalArgs),
    /// Change a goal's status or target date
    #[command(alias = "u")]
    Update(UpdateGoalArgs),
    /// Delete a goal with all its tasks and work units
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteGoalArgs),
}

// ============================================================================
// Task and work unit commands
// ============================================================================

/// Add a task (milestone) to a goal
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "Unique identifier of the goal to add this task to")]
    pub goal_id: u64,
    /// Title of the task
    pub title: String,
}

impl From<AddTaskArgs> for AddTask {
    fn from(val: AddTaskArgs) -> Self {
        AddTask {
            goal_id: val.goal_id,
            title: val.title,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a goal
    #[command(alias = "a")]
    Add(AddTaskArgs),
}

/// Add a work unit to a task
///
/// The task's estimate grows by the work unit's estimated minutes.
#[derive(Args)]
pub struct AddWorkUnitArgs {
    #[arg(help = "Unique identifier of the task to add this work unit to")]
    pub task_id: u64,
    /// Title of the work unit
    pub title: String,
    #[arg(short, long, help = "Estimated effort in minutes (1 to 600)")]
    pub minutes: u32,
    #[arg(short, long, help = "Kind of work")]
    pub kind: Option<WorkKindArg>,
    #[arg(short, long, help = "A concrete first action to get started")]
    pub first_action: Option<String>,
    #[arg(long, help = "How to tell the work unit is finished")]
    pub success_signal: Option<String>,
}

impl From<AddWorkUnitArgs> for AddWorkUnit {
    fn from(val: AddWorkUnitArgs) -> Self {
        AddWorkUnit {
            task_id: val.task_id,
            title: val.title,
            kind: val.kind.map(|k| k.to_string()),
            estimated_minutes: val.minutes,
            first_action: val.first_action,
            success_signal: val.success_signal,
        }
    }
}

#[derive(Args)]
pub struct ShowWorkUnitArgs {
    #[arg(help = "Unique identifier of the work unit to show")]
    pub id: u64,
}

impl From<ShowWorkUnitArgs> for Id {
    fn from(val: ShowWorkUnitArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum UnitCommands {
    /// Add a work unit to a task
    #[command(alias = "a")]
    Add(AddWorkUnitArgs),
    /// Show a single work unit
    #[command(alias = "s")]
    Show(ShowWorkUnitArgs),
}

// ============================================================================
// Plan commands
// ============================================================================

/// Show the plan for a day, generating it when none is stored
#[derive(Args)]
pub struct TodayArgs {
    #[arg(short, long, help = "Day to show (YYYY-MM-DD); defaults to today")]
    pub date: Option<String>,
    #[arg(short, long, help = "Slice size used if a plan has to be generated")]
    pub mode: Option<PlanModeArg>,
}

impl From<TodayArgs> for GeneratePlan {
    fn from(val: TodayArgs) -> Self {
        GeneratePlan {
            date: val.date,
            mode: val.mode.map(|m| m.to_string()),
        }
    }
}

/// Build a plan for a day
#[derive(Args)]
pub struct GeneratePlanArgs {
    #[arg(short, long, help = "Day to plan (YYYY-MM-DD); defaults to today")]
    pub date: Option<String>,
    #[arg(short, long, help = "Slice size profile; defaults to medium")]
    pub mode: Option<PlanModeArg>,
}

impl From<GeneratePlanArgs> for GeneratePlan {
    fn from(val: GeneratePlanArgs) -> Self {
        GeneratePlan {
            date: val.date,
            mode: val.mode.map(|m| m.to_string()),
        }
    }
}

/// Pull extra slices into a day's plan
#[derive(Args)]
pub struct AddMoreArgs {
    #[arg(help = "Extra minutes you can spend today")]
    pub minutes: u32,
    #[arg(short, long, help = "Day to extend (YYYY-MM-DD); defaults to today")]
    pub date: Option<String>,
    #[arg(
        short,
        long,
        help = "Slice size used when the day has no plan yet; defaults to medium"
    )]
    pub mode: Option<PlanModeArg>,
}

impl From<AddMoreArgs> for AddMoreSlices {
    fn from(val: AddMoreArgs) -> Self {
        AddMoreSlices {
            date: val.date,
            extra_minutes: val.minutes,
            mode: val.mode.map(|m| m.to_string()),
        }
    }
}

#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(short, long, help = "Day to show (YYYY-MM-DD); defaults to today")]
    pub date: Option<String>,
}

impl From<ShowPlanArgs> for ShowPlan {
    fn from(val: ShowPlanArgs) -> Self {
        ShowPlan { date: val.date }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Build and store the plan for a day, replacing any stored plan
    #[command(alias = "g")]
    Generate(GeneratePlanArgs),
    /// Discard the stored plan for a day and build a fresh one
    #[command(alias = "r")]
    Regenerate(GeneratePlanArgs),
    /// Pull extra slices into a day's plan
    #[command(alias = "m")]
    More(AddMoreArgs),
    /// Show the stored plan for a day
    #[command(alias = "s")]
    Show(ShowPlanArgs),
}

// ============================================================================
// Slice and feasibility commands
// ============================================================================

/// Identify a planned slice by its work unit and day
#[derive(Args)]
pub struct SliceArgs {
    #[arg(help = "Work unit ID of the planned slice")]
    pub work_unit_id: u64,
    #[arg(short, long, help = "Day of the plan (YYYY-MM-DD); defaults to today")]
    pub date: Option<String>,
}

impl From<SliceArgs> for SliceRef {
    fn from(val: SliceArgs) -> Self {
        SliceRef {
            date: val.date,
            work_unit_id: val.work_unit_id,
        }
    }
}

#[derive(Subcommand)]
pub enum SliceCommands {
    /// Mark a slice done and record its minutes as progress
    #[command(aliases = ["c", "done"])]
    Complete(SliceArgs),
    /// Mark a slice skipped
    #[command(alias = "s")]
    Skip(SliceArgs),
}

/// Check whether an amount of work fits before a target date
#[derive(Args)]
pub struct CheckFeasibilityArgs {
    #[arg(help = "Total minutes of work")]
    pub minutes: u32,
    #[arg(short, long, help = "Target date (YYYY-MM-DD)")]
    pub target_date: Option<String>,
}

impl From<CheckFeasibilityArgs> for AssessFeasibility {
    fn from(val: CheckFeasibilityArgs) -> Self {
        AssessFeasibility {
            total_minutes: val.minutes,
            target_date: val.target_date,
        }
    }
}

/// Suggest a target date for a new goal
#[derive(Args)]
pub struct SuggestTargetArgs {
    #[arg(help = "Total minutes of work in the new goal")]
    pub minutes: u32,
    #[arg(
        short,
        long,
        help = "Leave this goal out of the active goal count (e.g. the goal being planned)"
    )]
    pub exclude_goal: Option<u64>,
}

impl From<SuggestTargetArgs> for SuggestTargetDate {
    fn from(val: SuggestTargetArgs) -> Self {
        SuggestTargetDate {
            total_minutes: val.minutes,
            exclude_goal_id: val.exclude_goal,
        }
    }
}

#[derive(Subcommand)]
pub enum FeasibilityCommands {
    /// Check whether an amount of work fits before a target date
    #[command(alias = "c")]
    Check(CheckFeasibilityArgs),
    /// Suggest a target date for a new goal
    #[command(alias = "s")]
    Suggest(SuggestTargetArgs),
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum GoalStatusArg {
    Active,
    Paused,
    Completed,
}

impl std::fmt::Display for GoalStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatusArg::Active => write!(f, "active"),
            GoalStatusArg::Paused => write!(f, "paused"),
            GoalStatusArg::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PlanModeArg {
    /// 10 to 20 minute slices
    Light,
    /// 20 to 35 minute slices
    Medium,
    /// 40 to 60 minute slices
    Focus,
}

impl std::fmt::Display for PlanModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanModeArg::Light => write!(f, "light"),
            PlanModeArg::Medium => write!(f, "medium"),
            PlanModeArg::Focus => write!(f, "focus"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum WorkKindArg {
    Study,
    Practice,
    Build,
    Review,
    Explore,
}

impl std::fmt::Display for WorkKindArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkKindArg::Study => write!(f, "study"),
            WorkKindArg::Practice => write!(f, "practice"),
            WorkKindArg::Build => write!(f, "build"),
            WorkKindArg::Review => write!(f, "review"),
            WorkKindArg::Explore => write!(f, "explore"),
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Runs parsed commands against the planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Dispatch a top-level command. `serve` is handled by the caller.
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Goal { command } => self.handle_goal_command(command).await,
            Commands::Task { command } => self.handle_task_command(command).await,
            Commands::Unit { command } => self.handle_unit_command(command).await,
            Commands::Today(args) => self.today(&args.into()).await,
            Commands::Plan { command } => self.handle_plan_command(command).await,
            Commands::Slice { command } => self.handle_slice_command(command).await,
            Commands::Feasibility { command } => self.handle_feasibility_command(command).await,
            Commands::Capacity => self.capacity().await,
            Commands::Serve => bail!("The MCP server is not started from the command runner"),
        }
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::Create(args) => {
                let goal = self
                    .planner
                    .create_goal(&args.into())
                    .await
                    .context("Failed to create goal")?;
                self.renderer.render(&CreateResult::new(goal).to_string())
            }
            GoalCommands::List(args) => self.list_goals(&args.into()).await,
            GoalCommands::Show(args) => {
                let params: Id = args.into();
                let goal = self
                    .planner
                    .get_goal(&params)
                    .await
                    .context("Failed to get goal")?;
                match goal {
                    Some(goal) => self.renderer.render(&goal.to_string()),
                    None => bail!("Goal with ID {} not found", params.id),
                }
            }
            GoalCommands::Update(args) => {
                let result = self
                    .planner
                    .update_goal_result(&args.into())
                    .await
                    .context("Failed to update goal")?;
                self.renderer.render(&result.to_string())
            }
            GoalCommands::Delete(args) => {
                let params: DeleteGoal = args.into();
                let deleted = self
                    .planner
                    .delete_goal(&params)
                    .await
                    .context("Failed to delete goal")?;
                match deleted {
                    Some(result) => self.renderer.render(&result.to_string()),
                    None => bail!("Goal with ID {} not found", params.id),
                }
            }
        }
    }

    /// List goals under a heading describing the filter.
    pub async fn list_goals(&self, params: &ListGoals) -> Result<()> {
        let summaries = self
            .planner
            .list_goals_summary(params)
            .await
            .context("Failed to list goals")?;
        let title = goal_list_title(params, summaries.is_empty());
        self.renderer.render(&format!("# {title}\n\n{summaries}"))
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self
                    .planner
                    .add_task(&args.into())
                    .await
                    .context("Failed to add task")?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
        }
    }

    pub async fn handle_unit_command(&self, command: UnitCommands) -> Result<()> {
        match command {
            UnitCommands::Add(args) => {
                let unit = self
                    .planner
                    .add_work_unit(&args.into())
                    .await
                    .context("Failed to add work unit")?;
                self.renderer.render(&CreateResult::new(unit).to_string())
            }
            UnitCommands::Show(args) => {
                let unit = self
                    .planner
                    .get_work_unit(&args.into())
                    .await
                    .context("Failed to get work unit")?;
                self.renderer.render(&unit.to_string())
            }
        }
    }

    /// Show a day's plan, generating one first if the day has none.
    pub async fn today(&self, params: &GeneratePlan) -> Result<()> {
        let plan = self
            .planner
            .plan_for_day(params)
            .await
            .context("Failed to load today's plan")?;
        self.renderer.render(&plan.to_string())
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Generate(args) => {
                let generated = self
                    .planner
                    .generate_daily_plan(&args.into())
                    .await
                    .context("Failed to generate plan")?;
                self.renderer.render(&generated.to_string())
            }
            PlanCommands::Regenerate(args) => {
                let generated = self
                    .planner
                    .regenerate_daily_plan(&args.into())
                    .await
                    .context("Failed to regenerate plan")?;
                self.renderer.render(&generated.to_string())
            }
            PlanCommands::More(args) => {
                let plan = self
                    .planner
                    .add_more_slices(&args.into())
                    .await
                    .context("Failed to add slices")?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Show(args) => {
                let params: ShowPlan = args.into();
                let plan = self
                    .planner
                    .daily_plan(&params)
                    .await
                    .context("Failed to load plan")?;
                match plan {
                    Some(plan) => self.renderer.render(&plan.to_string()),
                    None => {
                        let day = params.date.as_deref().unwrap_or("today");
                        let status = OperationStatus::failure(format!(
                            "No plan stored for {day}. Run 'stride plan generate' to build one."
                        ));
                        self.renderer.render(&status.to_string())
                    }
                }
            }
        }
    }

    pub async fn handle_slice_command(&self, command: SliceCommands) -> Result<()> {
        let result = match command {
            SliceCommands::Complete(args) => self
                .planner
                .complete_slice(&args.into())
                .await
                .context("Failed to complete slice")?,
            SliceCommands::Skip(args) => self
                .planner
                .skip_slice(&args.into())
                .await
                .context("Failed to skip slice")?,
        };
        self.renderer.render(&result.to_string())
    }

    pub async fn handle_feasibility_command(&self, command: FeasibilityCommands) -> Result<()> {
        match command {
            FeasibilityCommands::Check(args) => {
                let report = self
                    .planner
                    .assess_feasibility(&args.into())
                    .await
                    .context("Failed to assess feasibility")?;
                self.renderer.render(&report.to_string())
            }
            FeasibilityCommands::Suggest(args) => {
                let suggestion = self.planner.suggest_target_date(&args.into()).await;
                self.renderer.render(&suggestion.to_string())
            }
        }
    }

    pub async fn capacity(&self) -> Result<()> {
        let minutes = self
            .planner
            .estimate_capacity()
            .await
            .context("Failed to estimate capacity")?;
        let status =
            OperationStatus::success(format!("Estimated capacity: {minutes} minutes per day"));
        self.renderer.render(&status.to_string())
    }
}
