//! Pluggable model backend abstraction
//!
//! The budget analysis needs exactly one capability from a language model:
//! turn a prompt into text. Everything else in the crate is testable without
//! a network through `MockBackend`.
//!
//! # Architecture
//!
//! - `AIBackend` trait: the single `invoke` operation plus identification for logs
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `OpenAICompatibleBackend`,
//!   `OllamaBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = AdvisorConfig::load()?;
//! let client = AIClient::from_config(&config)?;
//! let text = client.invoke("How should I budget $3,000?").await?;
//! ```
//!
//! Every HTTP backend shares one policy: a single attempt bounded by the
//! configured timeout. Any failure is returned as an error; nothing retries.

mod gemini;
mod mock;
mod ollama;
mod openai_compatible;

pub use gemini::GeminiBackend;
pub use mock::{MockBackend, MOCK_ANALYSIS};
pub use ollama::OllamaBackend;
pub use openai_compatible::OpenAICompatibleBackend;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{AdvisorConfig, BackendKind};
use crate::error::{Error, Result};

/// Trait defining the model capability
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Send `prompt` and return the model's text reply
    async fn invoke(&self, prompt: &str) -> Result<String>;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Google Generative Language API
    Gemini(GeminiBackend),
    /// OpenAI-compatible server (vLLM, LocalAI, llama-server, hosted APIs)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Ollama HTTP API
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Build the client selected by `config.backend`
    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        let client = match config.backend {
            BackendKind::Gemini => AIClient::Gemini(GeminiBackend::new(
                &config.gemini,
                config.temperature,
                config.timeout,
            )?),
            BackendKind::OpenAICompatible => {
                AIClient::OpenAICompatible(OpenAICompatibleBackend::new(
                    &config.openai_compatible,
                    config.temperature,
                    config.timeout,
                )?)
            }
            BackendKind::Ollama => AIClient::Ollama(OllamaBackend::new(
                &config.ollama,
                config.temperature,
                config.timeout,
            )?),
            BackendKind::Mock => AIClient::Mock(MockBackend::new()),
        };

        tracing::debug!(
            backend = %config.backend,
            model = %client.model(),
            host = %client.host(),
            "Model client ready"
        );

        Ok(client)
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl AIBackend for AIClient {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        match self {
            AIClient::Gemini(b) => b.invoke(prompt).await,
            AIClient::OpenAICompatible(b) => b.invoke(prompt).await,
            AIClient::Ollama(b) => b.invoke(prompt).await,
            AIClient::Mock(b) => b.invoke(prompt).await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.model(),
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.host(),
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

/// HTTP client with the request timeout applied
fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Turn a non-success response into an invocation error.
///
/// Uses the API's own message when the body is a JSON error object
/// (`{"error": {"message": ..}}` or Ollama's `{"error": ".."}`), else the raw body.
async fn error_for_response(service: &str, response: reqwest::Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Error::Invocation(format!(
        "{} API error {}: {}",
        service,
        status,
        error_detail(&body)
    ))
}

fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            let error = &v["error"];
            error["message"]
                .as_str()
                .or_else(|| error.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AIClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[test]
    fn test_from_config_selects_backend() {
        let mut config = AdvisorConfig::default();

        let client = AIClient::from_config(&config).unwrap();
        assert!(matches!(client, AIClient::Gemini(_)));
        assert_eq!(client.model(), "gemini-2.0-flash");

        config.set_backend(BackendKind::Ollama);
        config.ollama.host = "http://pi.local:11434/".to_string();
        let client = AIClient::from_config(&config).unwrap();
        assert!(matches!(client, AIClient::Ollama(_)));
        assert_eq!(client.host(), "http://pi.local:11434");

        config.set_backend(BackendKind::OpenAICompatible);
        let client = AIClient::from_config(&config).unwrap();
        assert!(matches!(client, AIClient::OpenAICompatible(_)));

        config.set_backend(BackendKind::Mock);
        let client = AIClient::from_config(&config).unwrap();
        assert!(matches!(client, AIClient::Mock(_)));
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(
            error_detail(r#"{"error":{"code":400,"message":"API key not valid"}}"#),
            "API key not valid"
        );
        assert_eq!(error_detail(r#"{"error":"model 'x' not found"}"#), "model 'x' not found");
        assert_eq!(error_detail("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_detail(r#"{"detail":"nope"}"#), r#"{"detail":"nope"}"#);
    }

    #[tokio::test]
    async fn test_mock_invoke_through_client() {
        let client = AIClient::mock();
        let reply = client.invoke("Monthly Income: $3,000.00").await.unwrap();
        assert!(!reply.is_empty());
    }
}
