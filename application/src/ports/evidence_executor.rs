//! Evidence Executor port
//!
//! Defines the interface for running evidence tool calls.

use async_trait::async_trait;
use tips_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::ToolResult,
};

/// Port for evidence tool execution
///
/// Every call produces a [`ToolResult`]; there is no error path. Absence
/// is a successful result without output, malformed calls are failed
/// results.
#[async_trait]
pub trait EvidenceExecutorPort: Send + Sync {
    /// Specification of all registered evidence tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Execute a tool call
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
