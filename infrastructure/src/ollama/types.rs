//! Wire types for the Ollama chat API and conversions to domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tips_application::ports::llm_gateway::{GatewayError, ToolResultMessage};
use tips_domain::{ContentBlock, LlmResponse, StopReason};

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub tools: &'a [serde_json::Value],
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: &'a serde_json::Map<String, serde_json::Value>,
    pub stream: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    /// Set on `role: "tool"` messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    pub function: WireFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub message: ChatMessage,
    #[serde(default)]
    pub done_reason: Option<String>,
}

/// Tool arguments as a map. Some models send them JSON-encoded in a string.
fn arguments_map(arguments: &serde_json::Value) -> HashMap<String, serde_json::Value> {
    match arguments {
        serde_json::Value::Object(map) => map.clone().into_iter().collect(),
        serde_json::Value::String(encoded) => {
            match serde_json::from_str::<serde_json::Value>(encoded) {
                Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
                _ => HashMap::new(),
            }
        }
        _ => HashMap::new(),
    }
}

pub fn convert_stop_reason(done_reason: Option<&str>, has_tool_calls: bool) -> StopReason {
    if has_tool_calls {
        return StopReason::ToolUse;
    }
    match done_reason {
        None | Some("stop") => StopReason::EndTurn,
        Some("length") => StopReason::MaxTokens,
        Some(other) => StopReason::Other(other.to_string()),
    }
}

/// Convert a chat response, numbering tool calls with `next_id`.
///
/// Ollama does not assign call ids, so the session supplies them.
pub fn convert_response(
    response: ChatResponse,
    mut next_id: impl FnMut() -> String,
) -> LlmResponse {
    let message = response.message;
    let mut content = Vec::new();

    if !message.content.trim().is_empty() {
        content.push(ContentBlock::Text(message.content));
    }
    for call in &message.tool_calls {
        content.push(ContentBlock::ToolUse {
            id: next_id(),
            name: call.function.name.clone(),
            input: arguments_map(&call.function.arguments),
        });
    }

    let stop_reason = convert_stop_reason(
        response.done_reason.as_deref(),
        !message.tool_calls.is_empty(),
    );

    LlmResponse {
        content,
        stop_reason: Some(stop_reason),
        model: response.model,
    }
}

/// Assistant history entry for a response.
pub fn response_to_message(response: &LlmResponse) -> ChatMessage {
    let tool_calls = response
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ToolUse { name, input, .. } => Some(WireToolCall {
                function: WireFunction {
                    name: name.clone(),
                    arguments: serde_json::json!(input),
                },
            }),
            ContentBlock::Text(_) => None,
        })
        .collect();

    ChatMessage {
        role: "assistant".to_string(),
        content: response.text_content(),
        tool_calls,
        tool_name: None,
    }
}

pub fn convert_tool_result(result: &ToolResultMessage) -> ChatMessage {
    ChatMessage {
        role: "tool".to_string(),
        content: result.output.clone(),
        tool_calls: Vec::new(),
        tool_name: Some(result.tool_name.clone()),
    }
}

/// Wrap an engine-neutral tool schema into Ollama's `function` shape.
pub fn convert_tool_schema(schema: &serde_json::Value) -> Option<serde_json::Value> {
    let name = schema.get("name")?.as_str()?;
    let description = schema
        .get("description")
        .and_then(|d| d.as_str())
        .unwrap_or_default();
    let parameters = schema
        .get("input_schema")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({"type": "object", "properties": {}}));

    Some(serde_json::json!({
        "type": "function",
        "function": {
            "name": name,
            "description": description,
            "parameters": parameters,
        }
    }))
}

pub fn convert_http_error(base_url: &str, error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(format!("Cannot reach Ollama at {}: {}", base_url, error))
    } else if error.is_decode() {
        GatewayError::InvalidResponse(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

pub fn convert_status_error(model: &str, status: reqwest::StatusCode, body: &str) -> GatewayError {
    if status == reqwest::StatusCode::NOT_FOUND {
        GatewayError::ModelNotAvailable(format!("{} ({})", model, body.trim()))
    } else {
        GatewayError::RequestFailed(format!("Ollama returned {}: {}", status, body.trim()))
    }
}
