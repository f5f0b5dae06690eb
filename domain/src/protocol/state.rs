//! Protocol state machine

use crate::core::tip::Tip;
use crate::session::response::LlmResponse;
use crate::tool::entities::ToolCall;
use crate::tool::terminal::{FINAL_ANSWER, answer_text};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of evidence turns before only `final_answer` is offered.
pub const DEFAULT_MAX_TOOL_TURNS: usize = 10;

/// Default number of tolerated protocol violations.
pub const DEFAULT_MAX_PROTOCOL_VIOLATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProtocolState {
    /// No evidence gathered yet
    Idle,
    /// At least one evidence call reached a source
    Gathering { calls: usize },
    /// The tip has been accepted
    Terminated,
}

/// A response the protocol refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolViolation {
    #[error("answered before calling any evidence tool")]
    PrematureAnswer,

    #[error("called final_answer more than once in one response")]
    MultipleAnswers,

    #[error("mixed final_answer with evidence tool calls")]
    AnswerMixedWithToolCalls,

    #[error("the answer was empty")]
    EmptyAnswer,

    #[error("kept calling evidence tools after the tool turn budget was spent")]
    ToolBudgetExhausted,

    #[error("called an unknown evidence tool or left out its `name` argument")]
    InvalidToolCall,
}

impl ProtocolViolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolViolation::PrematureAnswer => "premature_answer",
            ProtocolViolation::MultipleAnswers => "multiple_answers",
            ProtocolViolation::AnswerMixedWithToolCalls => "answer_mixed_with_tool_calls",
            ProtocolViolation::EmptyAnswer => "empty_answer",
            ProtocolViolation::ToolBudgetExhausted => "tool_budget_exhausted",
            ProtocolViolation::InvalidToolCall => "invalid_tool_call",
        }
    }
}

/// What the caller must do with one engine response.
#[derive(Debug, Clone)]
pub enum TurnAction {
    /// Execute these evidence calls in order, report the outcome with
    /// [`TipProtocol::record_evidence`], and send back the results
    Gather(Vec<ToolCall>),
    /// The invocation is finished with this tip
    Answer(Tip),
    /// Refuse the response and re-prompt
    Reject(ProtocolViolation),
}

/// One invocation's protocol state.
#[derive(Debug, Clone)]
pub struct TipProtocol {
    state: ProtocolState,
    tool_turns: usize,
    violations: usize,
    max_tool_turns: usize,
    max_violations: usize,
}

impl Default for TipProtocol {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOOL_TURNS, DEFAULT_MAX_PROTOCOL_VIOLATIONS)
    }
}

impl TipProtocol {
    pub fn new(max_tool_turns: usize, max_violations: usize) -> Self {
        Self {
            state: ProtocolState::Idle,
            tool_turns: 0,
            violations: 0,
            max_tool_turns: max_tool_turns.max(1),
            max_violations,
        }
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    pub fn tool_turns(&self) -> usize {
        self.tool_turns
    }

    pub fn violations(&self) -> usize {
        self.violations
    }

    /// Whether `final_answer` may be offered to the engine.
    pub fn offers_final_answer(&self) -> bool {
        matches!(self.state, ProtocolState::Gathering { .. })
    }

    /// Whether evidence tools may still be offered.
    pub fn offers_evidence(&self) -> bool {
        self.state != ProtocolState::Terminated && self.tool_turns < self.max_tool_turns
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ProtocolState::Terminated
    }

    /// More violations than tolerated have been recorded.
    pub fn violation_budget_exhausted(&self) -> bool {
        self.violations > self.max_violations
    }

    /// Classify `response` and advance the state accordingly.
    ///
    /// A [`TurnAction::Gather`] leaves the state alone until the outcome of
    /// the calls is known.
    pub fn advance(&mut self, response: &LlmResponse) -> TurnAction {
        let action = self.classify(response);
        match &action {
            TurnAction::Gather(_) => {}
            TurnAction::Answer(_) => self.state = ProtocolState::Terminated,
            TurnAction::Reject(_) => self.violations += 1,
        }
        action
    }

    /// Record the outcome of a gathered turn.
    ///
    /// `delivered` calls reached a registered source with a valid subject,
    /// `refused` ones did not. Only delivered calls count as evidence and
    /// use up a tool turn; any refused call is a violation.
    pub fn record_evidence(
        &mut self,
        delivered: usize,
        refused: usize,
    ) -> Option<ProtocolViolation> {
        if delivered > 0 {
            self.tool_turns += 1;
            self.state = match self.state {
                ProtocolState::Gathering { calls } => ProtocolState::Gathering {
                    calls: calls + delivered,
                },
                _ => ProtocolState::Gathering { calls: delivered },
            };
        }
        if refused == 0 {
            return None;
        }
        self.violations += 1;
        Some(ProtocolViolation::InvalidToolCall)
    }

    fn classify(&self, response: &LlmResponse) -> TurnAction {
        if self.is_terminated() {
            return TurnAction::Reject(ProtocolViolation::MultipleAnswers);
        }

        let (answers, evidence): (Vec<ToolCall>, Vec<ToolCall>) = response
            .tool_calls()
            .into_iter()
            .partition(|call| call.tool_name == FINAL_ANSWER);

        if !answers.is_empty() {
            if !evidence.is_empty() {
                return TurnAction::Reject(ProtocolViolation::AnswerMixedWithToolCalls);
            }
            if answers.len() > 1 {
                return TurnAction::Reject(ProtocolViolation::MultipleAnswers);
            }
            return self.accept_text(answer_text(&answers[0]).unwrap_or_default());
        }

        if !evidence.is_empty() {
            if !self.offers_evidence() {
                return TurnAction::Reject(ProtocolViolation::ToolBudgetExhausted);
            }
            return TurnAction::Gather(evidence);
        }

        self.accept_text(&response.text_content())
    }

    fn accept_text(&self, text: &str) -> TurnAction {
        if self.state == ProtocolState::Idle {
            return TurnAction::Reject(ProtocolViolation::PrematureAnswer);
        }
        match Tip::new(text) {
            Ok(tip) => TurnAction::Answer(tip),
            Err(_) => TurnAction::Reject(ProtocolViolation::EmptyAnswer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::terminal::ANSWER_ARG;

    fn evidence(tool: &str) -> ToolCall {
        ToolCall::new(tool).with_arg("name", "grep")
    }

    fn answer(text: &str) -> ToolCall {
        ToolCall::new(FINAL_ANSWER).with_arg(ANSWER_ARG, text)
    }

    /// Advance past one evidence turn where every call reached a source.
    fn gather(protocol: &mut TipProtocol, calls: Vec<ToolCall>) {
        let count = calls.len();
        let action = protocol.advance(&LlmResponse::from_tool_calls(calls));
        assert!(matches!(action, TurnAction::Gather(_)));
        assert_eq!(protocol.record_evidence(count, 0), None);
    }

    fn gathered() -> TipProtocol {
        let mut protocol = TipProtocol::default();
        gather(&mut protocol, vec![evidence("man_page")]);
        protocol
    }

    #[test]
    fn test_starts_idle_without_final_answer() {
        let protocol = TipProtocol::default();
        assert_eq!(protocol.state(), ProtocolState::Idle);
        assert!(!protocol.offers_final_answer());
        assert!(protocol.offers_evidence());
    }

    #[test]
    fn test_premature_text_rejected() {
        let mut protocol = TipProtocol::default();
        let action = protocol.advance(&LlmResponse::from_text("grep is great"));

        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::PrematureAnswer)
        ));
        assert_eq!(protocol.state(), ProtocolState::Idle);
        assert_eq!(protocol.violations(), 1);
    }

    #[test]
    fn test_premature_final_answer_rejected() {
        let mut protocol = TipProtocol::default();
        let action = protocol.advance(&LlmResponse::from_tool_calls(vec![answer("tip")]));
        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::PrematureAnswer)
        ));
    }

    #[test]
    fn test_one_call_then_answer() {
        let mut protocol = gathered();
        assert_eq!(protocol.state(), ProtocolState::Gathering { calls: 1 });
        assert!(protocol.offers_final_answer());

        let action = protocol.advance(&LlmResponse::from_tool_calls(vec![answer(
            "  Use grep -r to search directories.  ",
        )]));

        match action {
            TurnAction::Answer(tip) => assert_eq!(tip.as_str(), "Use grep -r to search directories."),
            other => panic!("expected answer, got {:?}", other),
        }
        assert!(protocol.is_terminated());
    }

    #[test]
    fn test_plain_text_after_call_accepted() {
        let mut protocol = gathered();
        let action = protocol.advance(&LlmResponse::from_text("Try grep -c to count matches."));
        assert!(matches!(action, TurnAction::Answer(_)));
    }

    #[test]
    fn test_multiple_answers_rejected() {
        let mut protocol = gathered();
        let action =
            protocol.advance(&LlmResponse::from_tool_calls(vec![answer("a"), answer("b")]));
        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::MultipleAnswers)
        ));
        assert!(!protocol.is_terminated());
    }

    #[test]
    fn test_mixed_answer_rejected() {
        let mut protocol = gathered();
        let action = protocol.advance(&LlmResponse::from_tool_calls(vec![
            evidence("probe"),
            answer("a"),
        ]));
        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::AnswerMixedWithToolCalls)
        ));
    }

    #[test]
    fn test_empty_answer_rejected() {
        let mut protocol = gathered();
        let action = protocol.advance(&LlmResponse::from_tool_calls(vec![answer("   ")]));
        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::EmptyAnswer)
        ));

        let action = protocol.advance(&LlmResponse::from_text(""));
        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::EmptyAnswer)
        ));
    }

    #[test]
    fn test_calls_accumulate() {
        let mut protocol = gathered();
        gather(&mut protocol, vec![evidence("tldr_page"), evidence("help_flag")]);
        assert_eq!(protocol.state(), ProtocolState::Gathering { calls: 3 });
        assert_eq!(protocol.tool_turns(), 2);
    }

    #[test]
    fn test_gather_waits_for_outcome() {
        let mut protocol = TipProtocol::default();
        let action = protocol.advance(&LlmResponse::from_tool_calls(vec![evidence("man_page")]));
        assert!(matches!(action, TurnAction::Gather(_)));
        assert_eq!(protocol.state(), ProtocolState::Idle);
        assert!(!protocol.offers_final_answer());
    }

    #[test]
    fn test_refused_calls_do_not_count_as_evidence() {
        let mut protocol = TipProtocol::default();
        let unknown = LlmResponse::from_tool_calls(vec![ToolCall::new("web_search")]);
        let action = protocol.advance(&unknown);
        assert!(matches!(action, TurnAction::Gather(_)));
        assert_eq!(
            protocol.record_evidence(0, 1),
            Some(ProtocolViolation::InvalidToolCall)
        );
        assert_eq!(protocol.state(), ProtocolState::Idle);
        assert_eq!(protocol.tool_turns(), 0);
        assert_eq!(protocol.violations(), 1);

        let action = protocol.advance(&LlmResponse::from_tool_calls(vec![answer("guess tip")]));
        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::PrematureAnswer)
        ));
        assert!(!protocol.is_terminated());
    }

    #[test]
    fn test_partly_refused_turn_still_gathers() {
        let mut protocol = TipProtocol::default();
        protocol.advance(&LlmResponse::from_tool_calls(vec![
            evidence("man_page"),
            ToolCall::new("probe"),
        ]));
        assert_eq!(
            protocol.record_evidence(1, 1),
            Some(ProtocolViolation::InvalidToolCall)
        );
        assert_eq!(protocol.state(), ProtocolState::Gathering { calls: 1 });
        assert!(protocol.offers_final_answer());
    }

    #[test]
    fn test_tool_turn_budget() {
        let mut protocol = TipProtocol::new(1, 3);
        gather(&mut protocol, vec![evidence("man_page")]);
        assert!(!protocol.offers_evidence());

        let action = protocol.advance(&LlmResponse::from_tool_calls(vec![evidence("probe")]));
        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::ToolBudgetExhausted)
        ));
    }

    #[test]
    fn test_violation_budget() {
        let mut protocol = TipProtocol::new(10, 2);
        for _ in 0..2 {
            protocol.advance(&LlmResponse::from_text("too early"));
            assert!(!protocol.violation_budget_exhausted());
        }
        protocol.advance(&LlmResponse::from_text("too early"));
        assert!(protocol.violation_budget_exhausted());
    }

    #[test]
    fn test_terminated_rejects_further_answers() {
        let mut protocol = gathered();
        protocol.advance(&LlmResponse::from_text("Done."));
        let action = protocol.advance(&LlmResponse::from_text("Another."));
        assert!(matches!(
            action,
            TurnAction::Reject(ProtocolViolation::MultipleAnswers)
        ));
    }

    #[test]
    fn test_violation_names() {
        assert_eq!(ProtocolViolation::PrematureAnswer.as_str(), "premature_answer");
        assert_eq!(ProtocolViolation::InvalidToolCall.as_str(), "invalid_tool_call");
        assert_eq!(
            ProtocolViolation::EmptyAnswer.to_string(),
            "the answer was empty"
        );
    }
}
