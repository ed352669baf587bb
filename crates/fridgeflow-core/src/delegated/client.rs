//! The `CompletionClient` trait -- the adapter interface for text-generation
//! services.
//!
//! The delegated planner only ever talks to a `dyn CompletionClient`, so the
//! wire protocol of a particular provider stays behind this seam.

use async_trait::async_trait;

use crate::error::PlanError;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Low randomness: plans should be repeatable, not creative.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Environment variable holding the API credential.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Settings for reaching the text-generation service.
///
/// The credential itself is not stored here; only the name of the
/// environment variable it is read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub api_key_env: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

/// One instruction pair sent to the service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    /// Ask the service to constrain its output to a JSON object.
    pub json_output: bool,
}

/// Adapter interface for a text-generation service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Human-readable provider name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send the request and return the raw text payload of the reply.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, PlanError>;
}

// Compile-time assertion: CompletionClient must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn CompletionClient) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, PlanError> {
            Ok(request.user.clone())
        }
    }

    #[tokio::test]
    async fn client_is_usable_as_trait_object() {
        let client: Box<dyn CompletionClient> = Box::new(EchoClient);
        let request = CompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            system: "sys".to_string(),
            user: "hello".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            json_output: true,
        };
        assert_eq!(client.name(), "echo");
        assert_eq!(client.complete(&request).await.unwrap(), "hello");
    }

    #[test]
    fn default_settings() {
        let settings = LlmSettings::default();
        assert_eq!(settings.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.api_key_env, "OPENAI_API_KEY");
        assert!(settings.temperature < 0.5);
    }
}
