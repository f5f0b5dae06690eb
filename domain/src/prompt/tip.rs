//! Prompt templates for tip generation

use crate::core::tool_name::ToolName;
use crate::protocol::ProtocolViolation;
use crate::tool::entities::ToolSpec;
use crate::tool::terminal::FINAL_ANSWER;

/// Templates for generating tip prompts
pub struct TipPromptTemplate;

impl TipPromptTemplate {
    /// System instruction for the engine
    pub fn system(tool_spec: &ToolSpec) -> String {
        let mut tools: Vec<_> = tool_spec.evidence_tools().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        let tool_descriptions = tools
            .iter()
            .map(|t| format!("- **{}**: {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Your job is to provide a concise, friendly 1-2 sentence tip about a given CLI command.

## Available Tools

{tool_descriptions}

Every tool takes a single `name` argument: the command to look up.

## Rules

1. Make the tip encouraging and inviting. Avoid tips that look repetitive or generic.
2. YOU MUST MAKE AT LEAST ONE TOOL CALL. Even when you feel confident you know the command, verify with a tool before writing the tip.
3. Try to find at least one natural language description of the command to base the tip on.
4. Do not guess what a command is before exhausting the available tools.
5. Do not use `{final_answer}` to report progress. Call it exactly once, after all other tool calls are done, with only the tip as its `answer`.
"#,
            tool_descriptions = tool_descriptions,
            final_answer = FINAL_ANSWER,
        )
    }

    /// Opening user message naming the target command
    pub fn request(tool: &ToolName) -> String {
        format!(
            "Write a tip for the command `{tool}`. Start by calling one of the tools with name=\"{tool}\".",
            tool = tool
        )
    }

    /// Re-prompt after a refused response
    pub fn correction(violation: ProtocolViolation, tool: &ToolName) -> String {
        let fix = match violation {
            ProtocolViolation::PrematureAnswer => format!(
                "You must call at least one evidence tool for `{}` before answering. Call a tool now.",
                tool
            ),
            ProtocolViolation::MultipleAnswers => format!(
                "Call `{}` exactly once with a single tip.",
                FINAL_ANSWER
            ),
            ProtocolViolation::AnswerMixedWithToolCalls => format!(
                "Do not combine `{}` with other tool calls. Finish gathering evidence first, then answer on its own.",
                FINAL_ANSWER
            ),
            ProtocolViolation::EmptyAnswer => {
                format!("The tip for `{}` must not be empty. Answer again.", tool)
            }
            ProtocolViolation::ToolBudgetExhausted => Self::answer_now(tool),
            ProtocolViolation::InvalidToolCall => format!(
                "Use only the listed evidence tools, each with name=\"{}\".",
                tool
            ),
        };
        format!("Rejected: you {}. {}", violation, fix)
    }

    /// Instruction once the evidence tool budget is spent
    pub fn answer_now(tool: &ToolName) -> String {
        format!(
            "No more evidence tools are available. Call `{}` now with your best tip for `{}`.",
            FINAL_ANSWER, tool
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ToolDefinition, ToolKind};
    use crate::tool::terminal::final_answer_definition;

    fn name(s: &str) -> ToolName {
        ToolName::new(s).unwrap()
    }

    #[test]
    fn test_system_lists_evidence_tools_only() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new(
                "tldr_page",
                "Local TLDR examples",
                ToolKind::Evidence,
            ))
            .register(ToolDefinition::new("man_page", "Man page", ToolKind::Evidence))
            .register(final_answer_definition());

        let prompt = TipPromptTemplate::system(&spec);

        assert!(prompt.contains("- **man_page**: Man page"));
        assert!(prompt.contains("- **tldr_page**: Local TLDR examples"));
        assert!(!prompt.contains("- **final_answer**"));
        assert!(prompt.find("man_page") < prompt.find("tldr_page"));
        assert!(prompt.contains("AT LEAST ONE TOOL CALL"));
    }

    #[test]
    fn test_request_names_tool() {
        assert!(TipPromptTemplate::request(&name("fzf")).contains("`fzf`"));
    }

    #[test]
    fn test_correction_mentions_violation() {
        let text = TipPromptTemplate::correction(ProtocolViolation::PrematureAnswer, &name("jq"));
        assert!(text.starts_with("Rejected: you answered before calling any evidence tool."));
        assert!(text.contains("`jq`"));

        let text =
            TipPromptTemplate::correction(ProtocolViolation::ToolBudgetExhausted, &name("jq"));
        assert!(text.contains("No more evidence tools"));

        let text = TipPromptTemplate::correction(ProtocolViolation::InvalidToolCall, &name("jq"));
        assert!(text.contains("unknown evidence tool"));
        assert!(text.contains("name=\"jq\""));
    }
}
