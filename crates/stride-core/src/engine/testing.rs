//! In-memory collaborators for engine unit tests.

use std::collections::BTreeMap;

use jiff::{civil::Date, Timestamp};

use crate::{
    error::{PlannerError, Result},
    models::{AllocationUpdate, DailyAllocation, Goal, GoalStatus, Task, WorkKind, WorkUnit},
    store::{AllocationStore, WorkRepository, WorkSnapshot},
};

/// Goals, tasks, work units, and allocations held in plain collections.
///
/// Work unit ids are handed out sequentially from 1000 so tests can map an
/// id back to its insertion index.
pub struct MemoryStore {
    goals: Vec<Goal>,
    tasks: Vec<Task>,
    work_units: Vec<WorkUnit>,
    allocations: BTreeMap<Date, DailyAllocation>,
    next_goal: u64,
    next_task: u64,
    next_work_unit: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            goals: Vec::new(),
            tasks: Vec::new(),
            work_units: Vec::new(),
            allocations: BTreeMap::new(),
            next_goal: 1,
            next_task: 100,
            next_work_unit: 1_000,
        }
    }
}

impl MemoryStore {
    pub fn add_goal(&mut self, title: &str, target_date: Option<Date>) -> u64 {
        let id = self.next_goal;
        self.next_goal += 1;
        self.goals.push(Goal {
            id,
            title: title.to_string(),
            status: GoalStatus::Active,
            target_date,
            lifelong: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            tasks: vec![],
        });
        id
    }

    pub fn add_task(&mut self, goal_id: u64, title: &str) -> u64 {
        let id = self.next_task;
        self.next_task += 1;
        let order = self.tasks.iter().filter(|t| t.goal_id == goal_id).count() as u32;
        self.tasks.push(Task {
            id,
            goal_id,
            title: title.to_string(),
            estimated_total_minutes: 0,
            completed_minutes: 0,
            order,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            work_units: vec![],
        });
        id
    }

    /// Add a work unit and grow its task's estimate and progress to match.
    pub fn add_work_unit(&mut self, task_id: u64, estimate: u32, completed: u32) -> u64 {
        let id = self.next_work_unit;
        self.next_work_unit += 1;
        self.work_units.push(WorkUnit {
            id,
            task_id,
            title: format!("Unit {id}"),
            kind: WorkKind::Study,
            estimated_total_minutes: estimate,
            completed_minutes: completed,
            first_action: None,
            success_signal: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        });
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.estimated_total_minutes += estimate;
            task.completed_minutes += completed;
        }
        id
    }

    pub fn set_goal_status(&mut self, goal_id: u64, status: GoalStatus) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) {
            goal.status = status;
        }
    }

    pub fn set_lifelong(&mut self, goal_id: u64) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) {
            goal.lifelong = true;
        }
    }

    pub fn rename_goal(&mut self, goal_id: u64, title: &str) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) {
            goal.title = title.to_string();
        }
    }

    pub fn goal(&self, goal_id: u64) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    /// Drop a task but leave its work units behind as orphans.
    pub fn remove_task_only(&mut self, task_id: u64) {
        self.tasks.retain(|t| t.id != task_id);
    }

    pub fn remove_work_unit(&mut self, work_unit_id: u64) {
        self.work_units.retain(|w| w.id != work_unit_id);
    }

    pub fn allocation_count(&self) -> usize {
        self.allocations.len()
    }
}

impl WorkRepository for MemoryStore {
    fn snapshot(&self) -> Result<WorkSnapshot> {
        Ok(WorkSnapshot {
            goals: self.goals.clone(),
            tasks: self.tasks.clone(),
            work_units: self.work_units.clone(),
        })
    }

    fn work_unit(&self, id: u64) -> Result<Option<WorkUnit>> {
        Ok(self.work_units.iter().find(|w| w.id == id).cloned())
    }

    fn task(&self, id: u64) -> Result<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.id == id).cloned())
    }

    fn goal_with_tasks(&self, id: u64) -> Result<Option<Goal>> {
        let Some(mut goal) = self.goal(id).cloned() else {
            return Ok(None);
        };
        goal.tasks = self
            .tasks
            .iter()
            .filter(|t| t.goal_id == id)
            .map(|t| {
                let mut task = t.clone();
                task.work_units = self
                    .work_units
                    .iter()
                    .filter(|w| w.task_id == t.id)
                    .cloned()
                    .collect();
                task
            })
            .collect();
        Ok(Some(goal))
    }

    fn record_progress(&mut self, work_unit_id: u64, minutes: u32) -> Result<WorkUnit> {
        let unit = self
            .work_units
            .iter_mut()
            .find(|w| w.id == work_unit_id)
            .ok_or(PlannerError::WorkUnitNotFound { id: work_unit_id })?;
        unit.completed_minutes =
            (unit.completed_minutes + minutes).min(unit.estimated_total_minutes);
        let updated = unit.clone();

        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == updated.task_id) {
            task.completed_minutes =
                (task.completed_minutes + minutes).min(task.estimated_total_minutes);
        }
        Ok(updated)
    }

    fn complete_goal(&mut self, goal_id: u64) -> Result<()> {
        self.set_goal_status(goal_id, GoalStatus::Completed);
        Ok(())
    }

    fn reset_goal_progress(&mut self, goal_id: u64) -> Result<()> {
        let task_ids: Vec<u64> = self
            .tasks
            .iter_mut()
            .filter(|t| t.goal_id == goal_id)
            .map(|t| {
                t.completed_minutes = 0;
                t.id
            })
            .collect();
        for unit in &mut self.work_units {
            if task_ids.contains(&unit.task_id) {
                unit.completed_minutes = 0;
            }
        }
        Ok(())
    }
}

impl AllocationStore for MemoryStore {
    fn get_by_date(&self, date: Date) -> Result<Option<DailyAllocation>> {
        Ok(self.allocations.get(&date).cloned())
    }

    fn create(&mut self, record: &DailyAllocation) -> Result<()> {
        self.allocations.insert(record.date, record.clone());
        Ok(())
    }

    fn update(&mut self, date: Date, update: &AllocationUpdate) -> Result<Option<DailyAllocation>> {
        let Some(record) = self.allocations.get_mut(&date) else {
            return Ok(None);
        };
        record.slices.extend(update.append.iter().copied());
        record.capacity_minutes = record.capacity_minutes.saturating_add(update.extra_capacity);
        record.total_minutes = record.slices.iter().map(|s| s.minutes).sum();
        if let Some((work_unit_id, outcome)) = update.outcome {
            if let Some(entry) = record
                .slices
                .iter_mut()
                .find(|s| s.work_unit_id == work_unit_id)
            {
                entry.outcome = outcome;
            }
            record.completed_minutes = Some(record.completed_total());
        }
        Ok(Some(record.clone()))
    }

    fn delete(&mut self, date: Date) -> Result<bool> {
        Ok(self.allocations.remove(&date).is_some())
    }

    fn with_outcomes(&self) -> Result<Vec<DailyAllocation>> {
        Ok(self
            .allocations
            .values()
            .filter(|a| a.has_outcome())
            .cloned()
            .collect())
    }
}
