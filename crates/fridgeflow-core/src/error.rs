use thiserror::Error;

/// Errors surfaced by the delegated planner and planner dispatch.
///
/// The heuristic planner never produces one of these.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The language-model credential (or client) is unavailable.
    #[error("{0}")]
    NotConfigured(String),

    /// The external reply could not be turned into a plan.
    #[error("invalid response from language model: {0}")]
    InvalidResponse(String),

    /// The external service could not be reached or returned a failure status.
    #[error("language model request failed: {0}")]
    Upstream(String),
}

impl PlanError {
    /// Whether the caller, rather than the server, has to fix this.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }
}
