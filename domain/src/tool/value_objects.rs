//! Tool domain value objects: immutable result and error types
//!
//! Every tool execution produces a [`ToolResult`]. For evidence tools the
//! result is *successful* whether or not the source had anything to say:
//! absence is carried as `output: None`, not as an error.

use serde::{Deserialize, Serialize};

/// Error for a malformed tool call.
///
/// Evidence sources never produce these; they are raised by the executor
/// before a source runs (unknown tool, missing argument) or by the protocol
/// layer when a call is refused.
///
/// | Code | Description |
/// |------|-------------|
/// | `INVALID_ARGUMENT` | Missing/blank `name` argument or unknown parameter |
/// | `NOT_FOUND` | Unknown tool name |
/// | `REFUSED` | The protocol does not allow this call right now |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "INVALID_ARGUMENT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("Unknown tool: {}", resource.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self::new("REFUSED", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of one tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// `false` only for malformed or refused calls
    pub success: bool,
    /// Evidence text; `None` on success means the source had nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Size of the returned evidence in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// Whether the evidence was cut to fit the context budget
    #[serde(default)]
    pub truncated: bool,
}

impl ToolResult {
    /// Evidence was found
    pub fn found(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        let output = output.into();
        Self {
            tool_name: tool_name.into(),
            success: true,
            metadata: ToolResultMetadata {
                bytes: Some(output.len()),
                ..Default::default()
            },
            output: Some(output),
            error: None,
        }
    }

    /// The source had nothing (not installed, failed, or no page)
    pub fn absent(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: None,
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Wrap a source's answer
    pub fn from_evidence(tool_name: impl Into<String>, evidence: Option<String>) -> Self {
        match evidence {
            Some(text) => Self::found(tool_name, text),
            None => Self::absent(tool_name),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.metadata.truncated = truncated;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Successful lookup that produced no evidence
    pub fn is_absent(&self) -> bool {
        self.success && self.output.is_none()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Text handed back to the reasoning engine for this result.
    ///
    /// Absence is spelled out so the engine knows the source was tried and
    /// can move on to another one instead of retrying.
    pub fn to_engine_text(&self, subject: &str) -> String {
        match (&self.output, &self.error) {
            (Some(text), _) => text.clone(),
            (None, Some(err)) => format!("Error: {}", err.message),
            (None, None) => format!(
                "No information available from {} for '{}'.",
                self.tool_name, subject
            ),
        }
    }
}
