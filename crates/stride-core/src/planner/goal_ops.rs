//! Goal, task, and work unit operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    models::{Goal, GoalFilter, GoalSummary, Task, WorkUnit},
    params::{AddTask, AddWorkUnit, CreateGoal, Id, ListGoals, UpdateGoal},
};

impl Planner {
    /// Creates a new active goal.
    pub async fn create_goal(&self, params: &CreateGoal) -> Result<Goal> {
        let target_date = params.validate()?;
        let title = params.title.trim().to_string();
        let lifelong = params.lifelong;

        let goal = self
            .with_database(move |db| db.create_goal(&title, target_date, lifelong))
            .await?;
        info!("Created goal {}", goal.id);
        Ok(goal)
    }

    /// Retrieves a goal with its tasks and work units.
    pub async fn get_goal(&self, params: &Id) -> Result<Option<Goal>> {
        let goal_id = params.id;
        self.with_database(move |db| db.get_goal(goal_id)).await
    }

    /// Lists goal summaries matching the status filter.
    pub async fn list_goals(&self, params: &ListGoals) -> Result<Vec<GoalSummary>> {
        let filter = GoalFilter::try_from(params)?;
        self.with_database(move |db| db.list_goals(Some(&filter)))
            .await
    }

    /// Changes a goal's status and/or target date.
    pub async fn update_goal(&self, params: &UpdateGoal) -> Result<Goal> {
        let changes = params.validate()?;
        let goal_id = params.id;
        self.with_database(move |db| db.update_goal(goal_id, &changes))
            .await
    }

    /// Soft-deletes a goal and removes its tasks and work units.
    pub async fn delete_goal_by_id(&self, params: &Id) -> Result<Goal> {
        let goal_id = params.id;
        let goal = self
            .with_database(move |db| db.delete_goal(goal_id))
            .await?;
        info!("Deleted goal {goal_id}");
        Ok(goal)
    }

    /// Appends a task to a goal.
    pub async fn add_task(&self, params: &AddTask) -> Result<Task> {
        params.validate()?;
        let goal_id = params.goal_id;
        let title = params.title.trim().to_string();
        self.with_database(move |db| db.add_task(goal_id, &title))
            .await
    }

    /// Adds a work unit to a task, growing the task's estimate.
    pub async fn add_work_unit(&self, params: &AddWorkUnit) -> Result<WorkUnit> {
        let kind = params.validate()?;
        let params = params.clone();
        self.with_database(move |db| {
            db.add_work_unit(
                params.task_id,
                params.title.trim(),
                kind,
                params.estimated_minutes,
                params.first_action.as_deref(),
                params.success_signal.as_deref(),
            )
        })
        .await
    }

    /// Retrieves a single work unit.
    pub async fn get_work_unit(&self, params: &Id) -> Result<WorkUnit> {
        let id = params.id;
        self.with_database(move |db| db.get_work_unit(id))
            .await?
            .ok_or(PlannerError::WorkUnitNotFound { id })
    }
}
