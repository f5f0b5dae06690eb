//! The terminal tool that ends an invocation with the tip.

use super::entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter};

pub const FINAL_ANSWER: &str = "final_answer";

/// Argument carrying the tip text.
pub const ANSWER_ARG: &str = "answer";

pub fn final_answer_definition() -> ToolDefinition {
    ToolDefinition::new(
        FINAL_ANSWER,
        "Deliver the finished tip. Call this exactly once, after all evidence gathering is done.",
        ToolKind::Terminal,
    )
    .with_parameter(ToolParameter::new(
        ANSWER_ARG,
        "The tip: one or two friendly sentences",
        true,
    ))
}

/// The answer text of a `final_answer` call.
///
/// Engines sometimes put the text under a different key; the first string
/// argument is accepted when `answer` is missing.
pub fn answer_text(call: &ToolCall) -> Option<&str> {
    call.get_string(ANSWER_ARG)
        .or_else(|| call.arguments.values().find_map(|v| v.as_str()))
}
