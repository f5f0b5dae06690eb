//! Ollama gateway
//!
//! Implements `LlmGateway` by handing out [`OllamaSession`]s that share one
//! HTTP client.

use super::session::OllamaSession;
use async_trait::async_trait;
use std::time::Duration;
use tips_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use tips_domain::ModelConfig;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Local models can take a while to load on first use.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaGateway {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    async fn create_session_with_system_prompt(
        &self,
        config: &ModelConfig,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        info!(model = %config.model, base_url = %self.base_url, "Opening Ollama session");
        Ok(Box::new(OllamaSession::new(
            self.client.clone(),
            self.base_url.clone(),
            config.clone(),
            system_prompt,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tips_domain::Model;

    #[tokio::test]
    async fn test_create_session() {
        let gateway = OllamaGateway::new(DEFAULT_BASE_URL, Duration::from_secs(5)).unwrap();
        let session = gateway
            .create_session_with_system_prompt(&ModelConfig::new(Model::new("llama3.1")), "sys")
            .await
            .unwrap();

        assert_eq!(session.model().as_str(), "llama3.1");
        assert_eq!(gateway.base_url(), DEFAULT_BASE_URL);
    }
}
