//! Planner that defers dish and step generation to a language model.
//!
//! # Flow
//!
//! ```text
//! DelegatedPlanner::plan(ingredients, minutes)
//!     |
//!     |-- read credential from env --(absent)--> PlanError::NotConfigured
//!     |
//!     |-- ClientFactory(settings, key) --> Box<dyn CompletionClient>
//!     |
//!     |-- complete(system prompt + user prompt, json_output)
//!     |
//!     v
//! parse_plan_response(raw) --> Plan | PlanError::InvalidResponse
//! ```

pub mod client;
pub mod openai;
pub mod prompt;

pub use client::{CompletionClient, CompletionRequest, LlmSettings};
pub use openai::OpenAiClient;
pub use prompt::{build_system_prompt, build_user_prompt};

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::PlanError;
use crate::model::{Plan, Step};

/// Builds a completion client from settings and a credential.
pub type ClientFactory =
    Arc<dyn Fn(&LlmSettings, String) -> Result<Box<dyn CompletionClient>, PlanError> + Send + Sync>;

/// Factory producing [`OpenAiClient`]s.
pub fn openai_factory() -> ClientFactory {
    Arc::new(
        |settings: &LlmSettings, api_key: String| -> Result<Box<dyn CompletionClient>, PlanError> {
            let client = OpenAiClient::new(settings, api_key)?;
            Ok(Box::new(client))
        },
    )
}

/// Language-model backed planner.
#[derive(Clone)]
pub struct DelegatedPlanner {
    settings: LlmSettings,
    factory: ClientFactory,
}

impl DelegatedPlanner {
    /// Planner talking to an OpenAI-compatible endpoint.
    pub fn new(settings: LlmSettings) -> Self {
        Self::with_factory(settings, openai_factory())
    }

    /// Planner using a custom client factory.
    pub fn with_factory(settings: LlmSettings, factory: ClientFactory) -> Self {
        Self { settings, factory }
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Read the credential. Looked up on every call, never cached.
    fn credential(&self) -> Result<String, PlanError> {
        std::env::var(&self.settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PlanError::NotConfigured(format!(
                    "{} not set. Use heuristic mode or configure an LLM.",
                    self.settings.api_key_env
                ))
            })
    }

    /// Ask the language model for a plan.
    pub async fn plan(&self, ingredients: &str, time_limit_minutes: i64) -> Result<Plan, PlanError> {
        let api_key = self.credential()?;
        let client = (self.factory)(&self.settings, api_key)?;

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system: build_system_prompt(time_limit_minutes),
            user: build_user_prompt(ingredients, time_limit_minutes),
            temperature: self.settings.temperature,
            json_output: true,
        };

        let raw = client.complete(&request).await?;
        let plan = parse_plan_response(&raw)?;

        let limit_seconds = time_limit_minutes.saturating_mul(60);
        if i64::from(plan.total_seconds()) > limit_seconds {
            warn!(
                total_sec = plan.total_seconds(),
                limit_sec = limit_seconds,
                "delegated plan overruns the time limit"
            );
        }

        info!(
            provider = client.name(),
            dish = %plan.dish,
            steps = plan.steps.len(),
            "delegated plan received"
        );
        Ok(plan)
    }
}

impl std::fmt::Debug for DelegatedPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedPlanner")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Parse a raw model reply into a plan.
///
/// Requires a JSON object with a string `dish` and a list `steps`. The
/// list may be empty. Individual steps are not checked beyond
/// deserializing as [`Step`].
pub fn parse_plan_response(raw: &str) -> Result<Plan, PlanError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| PlanError::InvalidResponse(format!("reply is not JSON: {e}")))?;

    let dish = value
        .get("dish")
        .and_then(Value::as_str)
        .ok_or_else(|| PlanError::InvalidResponse("missing string field `dish`".into()))?
        .to_string();

    let steps = value
        .get("steps")
        .filter(|steps| steps.is_array())
        .cloned()
        .ok_or_else(|| PlanError::InvalidResponse("missing list field `steps`".into()))?;
    let steps: Vec<Step> = serde_json::from_value(steps)
        .map_err(|e| PlanError::InvalidResponse(format!("malformed step: {e}")))?;

    let substitutions = match value.get("substitutions") {
        None | Some(Value::Null) => Vec::new(),
        Some(subs) => serde_json::from_value(subs.clone())
            .map_err(|e| PlanError::InvalidResponse(format!("malformed substitutions: {e}")))?,
    };

    Ok(Plan {
        dish,
        steps,
        substitutions,
    })
}
