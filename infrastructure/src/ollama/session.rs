//! Ollama LLM session implementation
//!
//! Wraps `POST /api/chat` to implement the `LlmSession` trait. The chat API
//! is stateless, so the full history is sent with every call.

use super::types::{self, ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tips_application::ports::llm_gateway::{GatewayError, LlmSession, ToolResultMessage};
use tips_domain::{LlmResponse, Model, ModelConfig};
use tokio::sync::Mutex;
use tracing::debug;

pub struct OllamaSession {
    client: reqwest::Client,
    base_url: String,
    config: ModelConfig,
    /// Conversation history, starting with the system prompt
    messages: Mutex<Vec<ChatMessage>>,
    /// Source of `call_{n}` ids, unique for the whole session
    next_call_id: AtomicUsize,
}

impl OllamaSession {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        config: ModelConfig,
        system_prompt: &str,
    ) -> Self {
        let mut messages = Vec::new();
        if !system_prompt.is_empty() {
            messages.push(ChatMessage::new("system", system_prompt));
        }
        Self {
            client,
            base_url: base_url.into(),
            config,
            messages: Mutex::new(messages),
            next_call_id: AtomicUsize::new(0),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }

    /// Call the chat endpoint with the current history.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        let tools: Vec<serde_json::Value> =
            tools.iter().filter_map(types::convert_tool_schema).collect();
        let request = ChatRequest {
            model: self.config.model.as_str(),
            messages,
            tools: &tools,
            options: &self.config.params,
            stream: false,
        };

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            tools = tools.len(),
            "Calling Ollama chat API"
        );

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| types::convert_http_error(&self.base_url, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(types::convert_status_error(
                self.config.model.as_str(),
                status,
                &body,
            ));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(types::convert_response(body, || {
            format!("call_{}", self.next_call_id.fetch_add(1, Ordering::Relaxed))
        }))
    }

    /// Append `new_messages` to the history and call the chat endpoint.
    async fn send_messages(
        &self,
        new_messages: Vec<ChatMessage>,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        let mut messages = self.messages.lock().await;
        messages.extend(new_messages);

        let response = self.chat(&messages, tools).await?;

        // Append assistant response to history
        messages.push(types::response_to_message(&response));

        Ok(response)
    }
}

#[async_trait]
impl LlmSession for OllamaSession {
    fn model(&self) -> &Model {
        &self.config.model
    }

    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        self.send_messages(vec![ChatMessage::new("user", content)], tools)
            .await
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        let messages = results.iter().map(types::convert_tool_result).collect();
        self.send_messages(messages, tools).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(base_url: &str) -> OllamaSession {
        OllamaSession::new(
            reqwest::Client::new(),
            base_url,
            ModelConfig::new(Model::new("gemma3")),
            "Be brief.",
        )
    }

    #[tokio::test]
    async fn test_system_prompt_seeds_history() {
        let session = session("http://localhost:11434");
        let messages = session.messages.lock().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "Be brief.");
    }

    #[test]
    fn test_chat_url_trims_slash() {
        assert_eq!(
            session("http://localhost:11434/").chat_url(),
            "http://localhost:11434/api/chat"
        );
    }

    #[tokio::test]
    async fn test_unreachable_daemon_is_gateway_error() {
        // Port 9 (discard) is closed on test machines.
        let session = session("http://127.0.0.1:9");
        let result = session.send_with_tools("hello", &[]).await;
        assert!(matches!(
            result,
            Err(GatewayError::ConnectionError(_)) | Err(GatewayError::RequestFailed(_))
        ));
        assert_eq!(session.model().as_str(), "gemma3");
    }
}
