//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces engine-neutral
//! JSON Schema. The Ollama gateway wraps each entry into its `function` shape.

use tips_application::ports::tool_schema::ToolSchemaPort;
use tips_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Default implementation producing engine-neutral JSON Schema.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"` → `"string"`
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

fn sorted<'a>(tools: impl Iterator<Item = &'a ToolDefinition>) -> Vec<&'a ToolDefinition> {
    let mut tools: Vec<&ToolDefinition> = tools.collect();
    tools.sort_by_key(|t| &t.name);
    tools
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": schema_type,
                    "description": param.description,
                }),
            );

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        sorted(spec.all())
            .into_iter()
            .map(|t| self.tool_to_schema(t))
            .collect()
    }

    fn evidence_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        sorted(spec.evidence_tools())
            .into_iter()
            .map(|t| self.tool_to_schema(t))
            .collect()
    }
}
