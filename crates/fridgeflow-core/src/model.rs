//! Wire-level types shared by both planners and the HTTP boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default time budget when a request does not specify one.
pub const DEFAULT_TIME_LIMIT_MIN: i64 = 30;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which planning strategy a request should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Deterministic keyword/arithmetic planner.
    #[default]
    Heuristic,
    /// Plan generation deferred to an external language model.
    #[serde(alias = "llm")]
    Delegated,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heuristic => write!(f, "heuristic"),
            Self::Delegated => write!(f, "delegated"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heuristic" => Ok(Self::Heuristic),
            "delegated" | "llm" => Ok(Self::Delegated),
            other => Err(format!("invalid mode: {other:?} (expected heuristic or delegated)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

fn default_time_limit() -> i64 {
    DEFAULT_TIME_LIMIT_MIN
}

/// One planning request, as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Free-text ingredient list (comma or newline separated).
    pub ingredients: String,
    /// Time budget in minutes. The heuristic planner clamps it.
    #[serde(
        rename = "time_limit_min",
        alias = "time_limit_minutes",
        default = "default_time_limit"
    )]
    pub time_limit_minutes: i64,
    #[serde(default)]
    pub mode: Mode,
}

impl PlanRequest {
    pub fn new(ingredients: impl Into<String>, time_limit_minutes: i64, mode: Mode) -> Self {
        Self {
            ingredients: ingredients.into(),
            time_limit_minutes,
            mode,
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// One labeled, timed unit of a cooking plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    /// Seconds from the start of cooking. Parallel steps share offsets.
    #[serde(rename = "start_offset_sec")]
    pub start_offset_seconds: u32,
    #[serde(rename = "duration_sec")]
    pub duration_seconds: u32,
}

impl Step {
    pub fn new(label: impl Into<String>, start_offset_seconds: u32, duration_seconds: u32) -> Self {
        Self {
            label: label.into(),
            start_offset_seconds,
            duration_seconds,
        }
    }

    /// Offset at which this step is done.
    pub fn end_seconds(&self) -> u32 {
        self.start_offset_seconds.saturating_add(self.duration_seconds)
    }
}

/// A complete cooking plan: dish name, steps in reading order, and tips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub dish: String,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub substitutions: Vec<String>,
}

impl Plan {
    /// End of the latest-finishing step, or 0 for an empty plan.
    pub fn total_seconds(&self) -> u32 {
        self.steps.iter().map(Step::end_seconds).max().unwrap_or(0)
    }
}

/// Format a second count as `m:ss`.
pub fn format_min_sec(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
