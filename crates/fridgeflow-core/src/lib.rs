//! Cooking-plan generation.
//!
//! Two strategies turn a free-text ingredient list and a time budget into a
//! [`Plan`]:
//!
//! - [`heuristic`]: keyword rules and a fixed, proportionally timed schedule.
//!   Pure and infallible.
//! - [`delegated`]: asks a language model through a [`CompletionClient`] and
//!   validates the JSON it returns.
//!
//! [`Planner`] routes a [`PlanRequest`] to one of them by [`Mode`], and a
//! [`Timeline`] tracks a cook's progress through the result.

pub mod delegated;
pub mod error;
pub mod heuristic;
pub mod model;
pub mod planner;
pub mod timeline;
#[cfg(test)]
mod test_util;

pub use delegated::{CompletionClient, CompletionRequest, DelegatedPlanner, LlmSettings};
pub use error::PlanError;
pub use model::{Mode, Plan, PlanRequest, Step, format_min_sec};
pub use planner::Planner;
pub use timeline::{StepStatus, Timeline};
