//! Mode dispatch: routes a [`PlanRequest`] to the matching planner.

use tracing::info;

use crate::delegated::{DelegatedPlanner, LlmSettings};
use crate::error::PlanError;
use crate::heuristic;
use crate::model::{Mode, Plan, PlanRequest};

/// Entry point used by request handlers.
#[derive(Debug, Clone)]
pub struct Planner {
    delegated: DelegatedPlanner,
}

impl Planner {
    pub fn new(delegated: DelegatedPlanner) -> Self {
        Self { delegated }
    }

    /// Planner whose delegated path talks to an OpenAI-compatible endpoint.
    pub fn from_settings(settings: LlmSettings) -> Self {
        Self::new(DelegatedPlanner::new(settings))
    }

    /// Produce a plan. Heuristic mode never fails.
    pub async fn plan(&self, request: &PlanRequest) -> Result<Plan, PlanError> {
        let plan = match request.mode {
            Mode::Heuristic => heuristic::plan(&request.ingredients, request.time_limit_minutes),
            Mode::Delegated => {
                self.delegated
                    .plan(&request.ingredients, request.time_limit_minutes)
                    .await?
            }
        };

        info!(
            mode = %request.mode,
            dish = %plan.dish,
            steps = plan.steps.len(),
            "plan ready"
        );
        Ok(plan)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::from_settings(LlmSettings::default())
    }
}
