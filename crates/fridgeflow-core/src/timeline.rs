//! Live progress through a plan.
//!
//! A [`Timeline`] maps wall-clock seconds since the cook pressed start onto
//! plan time. Falling behind adds drift, which pushes every remaining step
//! later without touching the plan itself.

use std::fmt;

use crate::model::{Plan, Step, format_min_sec};

/// Drift added each time the cook reports falling behind.
pub const BEHIND_STEP_SEC: u32 = 60;

/// Where a step stands at a given moment of plan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Not started; seconds until it starts.
    Pending(u32),
    /// In progress; seconds until it ends.
    Running(u32),
    Done,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending(secs) => write!(f, "starts in {}", format_min_sec(*secs)),
            Self::Running(secs) => write!(f, "time left {}", format_min_sec(*secs)),
            Self::Done => write!(f, "done"),
        }
    }
}

impl Step {
    /// Status at `elapsed_seconds` of plan time, which may be negative once
    /// drift exceeds the wall-clock time.
    ///
    /// A step runs on `[start, end)`: it is running at its start offset and
    /// done at its end.
    pub fn status_at(&self, elapsed_seconds: i64) -> StepStatus {
        let start = i64::from(self.start_offset_seconds);
        let end = i64::from(self.end_seconds());
        if elapsed_seconds < start {
            StepStatus::Pending(saturating_u32(start - elapsed_seconds))
        } else if elapsed_seconds < end {
            StepStatus::Running(saturating_u32(end - elapsed_seconds))
        } else {
            StepStatus::Done
        }
    }
}

fn saturating_u32(secs: i64) -> u32 {
    u32::try_from(secs).unwrap_or(u32::MAX)
}

/// Drift bookkeeping for one run through a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    drift_seconds: u32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the rest of the schedule back by [`BEHIND_STEP_SEC`].
    pub fn fall_behind(&mut self) {
        self.drift_seconds = self.drift_seconds.saturating_add(BEHIND_STEP_SEC);
    }

    pub fn reset(&mut self) {
        self.drift_seconds = 0;
    }

    pub fn drift_seconds(&self) -> u32 {
        self.drift_seconds
    }

    /// Plan time corresponding to `wall_seconds` since start.
    pub fn plan_elapsed(&self, wall_seconds: u64) -> i64 {
        i64::try_from(wall_seconds).unwrap_or(i64::MAX) - i64::from(self.drift_seconds)
    }

    /// Status of every step, in plan order.
    pub fn statuses(&self, plan: &Plan, wall_seconds: u64) -> Vec<StepStatus> {
        let elapsed = self.plan_elapsed(wall_seconds);
        plan.steps.iter().map(|step| step.status_at(elapsed)).collect()
    }

    /// True once every step is done. An empty plan is finished immediately.
    pub fn is_finished(&self, plan: &Plan, wall_seconds: u64) -> bool {
        self.statuses(plan, wall_seconds)
            .iter()
            .all(|status| *status == StepStatus::Done)
    }
}
