//! LLM Gateway port
//!
//! Defines the interface for communicating with the reasoning engine.

use async_trait::async_trait;
use thiserror::Error;
use tips_domain::{LlmResponse, Model, ModelConfig};

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Result of one tool call, sent back to the engine.
#[derive(Debug, Clone)]
pub struct ToolResultMessage {
    /// Identifier of the call this answers (e.g. "call_0")
    pub tool_use_id: String,
    pub tool_name: String,
    /// Evidence text, absence notice or error text
    pub output: String,
    pub is_error: bool,
}

/// Gateway for engine communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session configured with `config` and a system prompt
    async fn create_session_with_system_prompt(
        &self,
        config: &ModelConfig,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active engine session holding the conversation so far.
///
/// `tools` is the JSON-schema tool list offered for that turn; the set may
/// change between turns.
#[async_trait]
pub trait LlmSession: Send + Sync {
    fn model(&self) -> &Model;

    /// Send a user message and get a structured response
    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError>;

    /// Answer the previous response's tool calls
    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError>;
}
