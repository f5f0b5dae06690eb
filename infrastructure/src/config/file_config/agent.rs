//! Agent configuration (`agent` section)

use super::ConfigError;
use serde::{Deserialize, Serialize};
use tips_application::ExecutionParams;
use tips_domain::protocol::{DEFAULT_MAX_PROTOCOL_VIOLATIONS, DEFAULT_MAX_TOOL_TURNS};

/// Raw agent configuration
///
/// ```toml
/// [agent]
/// max_tool_turns = 10           # evidence turns before the engine must answer
/// max_protocol_violations = 3   # rejected responses tolerated before failing
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_tool_turns: usize,
    pub max_protocol_violations: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_tool_turns: DEFAULT_MAX_TOOL_TURNS,
            max_protocol_violations: DEFAULT_MAX_PROTOCOL_VIOLATIONS,
        }
    }
}

impl FileAgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tool_turns == 0 {
            return Err(ConfigError::Zero("agent.max_tool_turns"));
        }
        Ok(())
    }

    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_tool_turns(self.max_tool_turns)
            .with_max_protocol_violations(self.max_protocol_violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_params() {
        let config = FileAgentConfig {
            max_tool_turns: 4,
            max_protocol_violations: 0,
        };
        let params = config.execution_params();
        assert_eq!(params.max_tool_turns, 4);
        assert_eq!(params.max_protocol_violations, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_tool_turns_rejected() {
        let config = FileAgentConfig {
            max_tool_turns: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
