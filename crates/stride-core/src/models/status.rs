//! Enumerations for goal status, work kinds, plan modes, and slice state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of goal statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// Goal is being worked on and feeds the daily plan
    #[default]
    Active,

    /// Goal is on hold and excluded from planning
    Paused,

    /// Goal has been achieved
    Completed,
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "paused" => Ok(GoalStatus::Paused),
            "completed" | "done" => Ok(GoalStatus::Completed),
            _ => Err(format!("Invalid goal status: {s}")),
        }
    }
}

impl GoalStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Paused => "paused",
            GoalStatus::Completed => "completed",
        }
    }
}

/// The nature of the effort a work unit asks for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkKind {
    #[default]
    Study,
    Practice,
    Build,
    Review,
    Explore,
}

impl FromStr for WorkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "study" => Ok(WorkKind::Study),
            "practice" => Ok(WorkKind::Practice),
            "build" => Ok(WorkKind::Build),
            "review" => Ok(WorkKind::Review),
            "explore" => Ok(WorkKind::Explore),
            _ => Err(format!("Invalid work kind: {s}")),
        }
    }
}

impl WorkKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkKind::Study => "study",
            WorkKind::Practice => "practice",
            WorkKind::Build => "build",
            WorkKind::Review => "review",
            WorkKind::Explore => "explore",
        }
    }
}

/// Size profile controlling how large generated slices are.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    Light,
    #[default]
    Medium,
    Focus,
}

impl FromStr for PlanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(PlanMode::Light),
            "medium" => Ok(PlanMode::Medium),
            "focus" => Ok(PlanMode::Focus),
            _ => Err(format!("Invalid plan mode: {s}")),
        }
    }
}

impl PlanMode {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanMode::Light => "light",
            PlanMode::Medium => "medium",
            PlanMode::Focus => "focus",
        }
    }

    /// Inclusive `(min, max)` minute range for slices generated in this mode.
    ///
    /// ```rust
    /// use stride_core::models::PlanMode;
    ///
    /// assert_eq!(PlanMode::Light.minute_range(), (10, 20));
    /// assert_eq!(PlanMode::Medium.minute_range(), (20, 35));
    /// assert_eq!(PlanMode::Focus.minute_range(), (40, 60));
    /// ```
    pub fn minute_range(&self) -> (u32, u32) {
        match self {
            PlanMode::Light => (10, 20),
            PlanMode::Medium => (20, 35),
            PlanMode::Focus => (40, 60),
        }
    }
}

/// Display bucket for a slice, derived from its minutes only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SliceLabel {
    Light,
    Medium,
    Heavy,
}

impl SliceLabel {
    /// Bucket a minute count.
    ///
    /// ```rust
    /// use stride_core::models::SliceLabel;
    ///
    /// assert_eq!(SliceLabel::from_minutes(15), SliceLabel::Light);
    /// assert_eq!(SliceLabel::from_minutes(30), SliceLabel::Medium);
    /// assert_eq!(SliceLabel::from_minutes(45), SliceLabel::Heavy);
    /// ```
    pub fn from_minutes(minutes: u32) -> Self {
        match minutes {
            0..=20 => SliceLabel::Light,
            21..=35 => SliceLabel::Medium,
            _ => SliceLabel::Heavy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SliceLabel::Light => "light",
            SliceLabel::Medium => "medium",
            SliceLabel::Heavy => "heavy",
        }
    }
}

/// What happened to a slice after it was planned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SliceOutcome {
    #[default]
    Pending,
    Completed,
    Skipped,
}

impl FromStr for SliceOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SliceOutcome::Pending),
            "completed" => Ok(SliceOutcome::Completed),
            "skipped" => Ok(SliceOutcome::Skipped),
            _ => Err(format!("Invalid slice outcome: {s}")),
        }
    }
}

impl SliceOutcome {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SliceOutcome::Pending => "pending",
            SliceOutcome::Completed => "completed",
            SliceOutcome::Skipped => "skipped",
        }
    }

    /// Get outcome with consistent icon formatting for display.
    ///
    /// ```rust
    /// use stride_core::models::SliceOutcome;
    ///
    /// assert_eq!(SliceOutcome::Completed.with_icon(), "✓ Done");
    /// assert_eq!(SliceOutcome::Skipped.with_icon(), "↷ Skipped");
    /// assert_eq!(SliceOutcome::Pending.with_icon(), "○ Open");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            SliceOutcome::Completed => "✓ Done",
            SliceOutcome::Skipped => "↷ Skipped",
            SliceOutcome::Pending => "○ Open",
        }
    }
}
