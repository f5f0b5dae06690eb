//! Tool schema conversion port.
//!
//! Separates "which tools to offer" (domain) from "how to serialize them for
//! the engine" (infrastructure).

use tips_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to the engine's JSON Schema format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to a JSON Schema array (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;

    /// Convert evidence tools only (sorted by name).
    fn evidence_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}
