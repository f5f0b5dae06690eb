//! Argument validation for evidence tool calls

use super::entities::ToolCall;
use super::evidence::NAME_ARG;
use super::value_objects::ToolError;
use crate::core::tool_name::ToolName;

/// Extract and validate the command name an evidence call refers to.
///
/// Evidence tools take exactly one argument, `name`. Unknown arguments are
/// rejected so a confused engine learns the schema from the error text.
pub fn evidence_subject(call: &ToolCall) -> Result<ToolName, ToolError> {
    if let Some(extra) = call.arguments.keys().find(|k| k.as_str() != NAME_ARG) {
        return Err(ToolError::invalid_argument(format!(
            "Unknown argument '{}' for {}; only '{}' is accepted",
            extra, call.tool_name, NAME_ARG
        )));
    }

    let raw = call
        .require_string(NAME_ARG)
        .map_err(ToolError::invalid_argument)?;

    ToolName::new(raw).map_err(|e| ToolError::invalid_argument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_subject_is_trimmed() {
        let call = ToolCall::new("man_page").with_arg("name", "  grep ");
        assert_eq!(evidence_subject(&call).unwrap().as_str(), "grep");
    }

    #[test]
    fn test_missing_name() {
        let err = evidence_subject(&ToolCall::new("man_page")).unwrap_err();
        assert_eq!(err.code, "INVALID_ARGUMENT");
        assert!(err.message.contains("name"));
    }

    #[test]
    fn test_blank_name() {
        let call = ToolCall::new("probe").with_arg("name", "   ");
        assert_eq!(evidence_subject(&call).unwrap_err().code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_non_string_name() {
        let call = ToolCall::new("probe").with_arg("name", 42);
        assert!(evidence_subject(&call).is_err());
    }

    #[test]
    fn test_unknown_argument() {
        let call = ToolCall::new("probe")
            .with_arg("name", "ls")
            .with_arg("verbose", true);
        let err = evidence_subject(&call).unwrap_err();
        assert!(err.message.contains("verbose"));
    }
}
