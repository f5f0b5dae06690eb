//! Execution parameters: use case loop control.
//!
//! [`ExecutionParams`] groups the static parameters that bound the engine
//! loop in [`GenerateTipUseCase`](crate::use_cases::generate_tip::GenerateTipUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use tips_domain::protocol::{DEFAULT_MAX_PROTOCOL_VIOLATIONS, DEFAULT_MAX_TOOL_TURNS};

/// Tip loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionParams {
    /// Evidence turns before only `final_answer` is offered.
    pub max_tool_turns: usize,
    /// Rejected responses tolerated before the invocation fails.
    pub max_protocol_violations: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_tool_turns: DEFAULT_MAX_TOOL_TURNS,
            max_protocol_violations: DEFAULT_MAX_PROTOCOL_VIOLATIONS,
        }
    }
}

impl ExecutionParams {
    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    pub fn with_max_protocol_violations(mut self, max: usize) -> Self {
        self.max_protocol_violations = max;
        self
    }
}
