//! Goal handler operations that return formatted wrapper types for the
//! Planner.

use super::Planner;
use crate::{
    display::{DeleteResult, GoalSummaries, UpdateResult},
    error::{PlannerError, Result},
    models::Goal,
    params::{DeleteGoal, Id, ListGoals, UpdateGoal},
};

impl Planner {
    /// Handle listing goals as summaries with minute totals.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use stride_core::{params::ListGoals, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let summaries = planner.list_goals_summary(&ListGoals::default()).await?;
    /// println!("{summaries}");
    /// # Result::<(), stride_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_goals_summary(&self, params: &ListGoals) -> Result<GoalSummaries> {
        let summaries = self.list_goals(params).await?;
        Ok(GoalSummaries(summaries))
    }

    /// Handle a goal update, describing each change that was applied.
    pub async fn update_goal_result(&self, params: &UpdateGoal) -> Result<UpdateResult<Goal>> {
        let goal = self.update_goal(params).await?;

        let mut changes = Vec::new();
        if params.status.is_some() {
            changes.push(format!("Status set to {}", goal.status.as_str()));
        }
        if params.clear_target_date {
            changes.push("Target date cleared".to_string());
        } else if let Some(target) = goal.target_date.filter(|_| params.target_date.is_some()) {
            changes.push(format!("Target date set to {target}"));
        }

        Ok(UpdateResult::with_changes(goal, changes))
    }

    /// Handle goal deletion, which requires explicit confirmation.
    ///
    /// Returns `None` when the goal does not exist.
    pub async fn delete_goal(&self, params: &DeleteGoal) -> Result<Option<DeleteResult<Goal>>> {
        if !params.confirmed {
            return Err(PlannerError::invalid_input("confirmed").with_reason(
                "Goal deletion requires explicit confirmation. Set 'confirmed' to true to remove the goal with all its tasks and work units.",
            ));
        }

        let id_params = Id { id: params.id };
        match self.delete_goal_by_id(&id_params).await {
            Ok(goal) => Ok(Some(DeleteResult::new(goal))),
            Err(PlannerError::GoalNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
