//! Structured engine responses for native tool calling.
//!
//! The engine answers each turn with a list of content blocks mixing text
//! and tool-use requests. The tip protocol classifies a whole response, so
//! blocks keep their order.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within an engine response.
///
/// # Examples
///
/// ```
/// use tips_domain::session::response::ContentBlock;
///
/// let text = ContentBlock::Text("Checking the man page.".to_string());
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_0".to_string(),
///     name: "man_page".to_string(),
///     input: [("name".to_string(), serde_json::json!("grep"))]
///         .into_iter().collect(),
/// };
/// assert!(tool.as_text().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(String),

    /// A tool call requested by the engine.
    ToolUse {
        /// Identifier correlating the call with its result (e.g. "call_0").
        id: String,
        name: String,
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Reason the engine stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of the turn.
    EndTurn,
    /// The engine wants tool results before continuing.
    ToolUse,
    /// Generation hit the token limit.
    MaxTokens,
    /// Engine-specific stop reason (e.g. Ollama's `done_reason`).
    Other(String),
}

/// A structured engine response.
///
/// # Examples
///
/// ```
/// use tips_domain::session::response::{ContentBlock, LlmResponse, StopReason};
///
/// let response = LlmResponse::from_text("Try `rg -uu` to search hidden files.");
/// assert!(response.tool_calls().is_empty());
///
/// let response = LlmResponse {
///     content: vec![ContentBlock::ToolUse {
///         id: "call_0".to_string(),
///         name: "tldr_page".to_string(),
///         input: [("name".to_string(), serde_json::json!("rg"))]
///             .into_iter().collect(),
///     }],
///     stop_reason: Some(StopReason::ToolUse),
///     model: Some("gemma3".to_string()),
/// };
/// assert_eq!(response.tool_calls().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<StopReason>,
    /// Model identifier echoed by the engine, if any.
    pub model: Option<String>,
}

impl LlmResponse {
    /// Text-only response ending the turn.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Response consisting only of tool calls.
    pub fn from_tool_calls(calls: impl IntoIterator<Item = ToolCall>) -> Self {
        let content = calls
            .into_iter()
            .enumerate()
            .map(|(i, call)| ContentBlock::ToolUse {
                id: call.native_id.unwrap_or_else(|| format!("call_{}", i)),
                name: call.tool_name,
                input: call.arguments,
            })
            .collect();
        Self {
            content,
            stop_reason: Some(StopReason::ToolUse),
            model: None,
        }
    }

    /// Concatenate all `Text` blocks.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// All `ToolUse` blocks as calls, in order, with `native_id` set.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::from_native(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }
}
