//! Generate Tip use case.
//!
//! Drives the reasoning engine through the tip protocol:
//!
//! 1. Create a session with the tip system instruction
//! 2. Ask for a tip, offering evidence tools only
//! 3. Execute evidence calls one at a time and send the results back,
//!    offering `final_answer` once a call has reached a source
//! 4. Refuse responses that break the protocol, and calls to unknown tools
//!    or without a subject, and re-prompt until the violation budget is spent
//! 5. Return the accepted [`Tip`]

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::evidence_executor::EvidenceExecutorPort;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage};
use crate::ports::progress::TipProgressNotifier;
use crate::ports::tool_schema::ToolSchemaPort;
use std::sync::Arc;
use thiserror::Error;
use tips_domain::tool::evidence::NAME_ARG;
use tips_domain::tool::terminal::final_answer_definition;
use tips_domain::{
    LlmResponse, ModelConfig, ProtocolViolation, Tip, TipPromptTemplate, TipProtocol, ToolCall,
    ToolError, ToolName, ToolResult, ToolSpec, TurnAction, truncate_str,
};
use tracing::{debug, info, warn};

/// Errors that can occur while generating a tip.
#[derive(Error, Debug)]
pub enum GenerateTipError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Engine kept breaking the tip protocol ({count} violations, last: {violation})")]
    ProtocolViolation {
        violation: ProtocolViolation,
        count: usize,
    },
}

/// Input for the [`GenerateTipUseCase`].
#[derive(Debug, Clone)]
pub struct GenerateTipInput {
    /// Command to write a tip for
    pub tool: ToolName,
    pub model: ModelConfig,
    pub execution: ExecutionParams,
}

impl GenerateTipInput {
    pub fn new(tool: ToolName, model: ModelConfig, execution: ExecutionParams) -> Self {
        Self {
            tool,
            model,
            execution,
        }
    }
}

/// Result of a successful invocation.
#[derive(Debug, Clone)]
pub struct GenerateTipOutput {
    pub tip: Tip,
    /// Evidence calls that reached a source
    pub tool_calls: usize,
    /// Responses refused by the protocol
    pub violations: usize,
}

/// Use case for generating one tip.
#[derive(Clone)]
pub struct GenerateTipUseCase {
    gateway: Arc<dyn LlmGateway>,
    evidence: Arc<dyn EvidenceExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl GenerateTipUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        evidence: Arc<dyn EvidenceExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            gateway,
            evidence,
            tool_schema,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: GenerateTipInput,
        progress: &dyn TipProgressNotifier,
    ) -> Result<GenerateTipOutput, GenerateTipError> {
        let result = self.run(&input, progress).await;
        progress.on_finish(result.is_ok());
        result
    }

    async fn run(
        &self,
        input: &GenerateTipInput,
        progress: &dyn TipProgressNotifier,
    ) -> Result<GenerateTipOutput, GenerateTipError> {
        let tool = &input.tool;
        info!("Generating tip for '{}' with {}", tool, input.model.model);

        let spec = self
            .evidence
            .tool_spec()
            .clone()
            .register(final_answer_definition());

        let system_prompt = TipPromptTemplate::system(&spec);
        let session = self
            .gateway
            .create_session_with_system_prompt(&input.model, &system_prompt)
            .await?;
        progress.on_start(tool, session.model().as_str());

        self.conversation_logger.log(ConversationEvent::new(
            "tip_request",
            serde_json::json!({
                "tool": tool.as_str(),
                "model": input.model.model.as_str(),
                "context_tokens": input.model.context_tokens,
                "evidence_tools": spec.evidence_tools().count(),
            }),
        ));

        let mut protocol = TipProtocol::new(
            input.execution.max_tool_turns,
            input.execution.max_protocol_violations,
        );
        let mut tool_calls = 0usize;

        progress.on_thinking();
        let mut response = session
            .send_with_tools(
                &TipPromptTemplate::request(tool),
                &self.offered_tools(&protocol, &spec),
            )
            .await?;

        loop {
            match protocol.advance(&response) {
                TurnAction::Answer(tip) => {
                    info!(
                        "Tip for '{}' accepted after {} tool calls",
                        tool, tool_calls
                    );
                    self.conversation_logger.log(ConversationEvent::new(
                        "tip_response",
                        serde_json::json!({
                            "tool": tool.as_str(),
                            "tool_calls": tool_calls,
                            "violations": protocol.violations(),
                            "tip": tip.as_str(),
                        }),
                    ));
                    return Ok(GenerateTipOutput {
                        tip,
                        tool_calls,
                        violations: protocol.violations(),
                    });
                }
                TurnAction::Gather(calls) => {
                    let mut messages = Vec::new();
                    let mut refused = 0usize;
                    for call in &calls {
                        let result = self.run_evidence(call, tool, progress).await;
                        if !result.is_success() {
                            refused += 1;
                        }
                        let subject = call.get_string(NAME_ARG).unwrap_or(tool.as_str());
                        push_result(&mut messages, call, &result, subject);
                    }
                    let delivered = calls.len() - refused;
                    tool_calls += delivered;

                    if let Some(violation) = protocol.record_evidence(delivered, refused) {
                        self.note_violation(violation, &protocol, input, &response, progress)?;
                        if let Some(last) = messages.last_mut() {
                            last.output.push_str("\n\n");
                            last.output.push_str(&TipPromptTemplate::correction(violation, tool));
                        }
                    }

                    if !protocol.offers_evidence() {
                        debug!(
                            "Tool turn budget spent after {} turns",
                            protocol.tool_turns()
                        );
                        if let Some(last) = messages.last_mut() {
                            last.output.push_str("\n\n");
                            last.output.push_str(&TipPromptTemplate::answer_now(tool));
                        }
                    }

                    debug!(
                        "Tool turn {}: sending {} tool results",
                        protocol.tool_turns(),
                        messages.len()
                    );
                    progress.on_thinking();
                    let tools = self.offered_tools(&protocol, &spec);
                    response = if messages.is_empty() {
                        session
                            .send_with_tools(&TipPromptTemplate::request(tool), &tools)
                            .await?
                    } else {
                        session.send_tool_results(&messages, &tools).await?
                    };
                }
                TurnAction::Reject(violation) => {
                    self.note_violation(violation, &protocol, input, &response, progress)?;
                    progress.on_thinking();
                    response = self
                        .reprompt(&*session, &response, violation, tool, &protocol, &spec)
                        .await?;
                }
            }
        }
    }

    /// Report a recorded violation; fails once the budget is spent.
    fn note_violation(
        &self,
        violation: ProtocolViolation,
        protocol: &TipProtocol,
        input: &GenerateTipInput,
        response: &LlmResponse,
        progress: &dyn TipProgressNotifier,
    ) -> Result<(), GenerateTipError> {
        warn!(
            "Protocol violation {}/{}: engine {}",
            protocol.violations(),
            input.execution.max_protocol_violations,
            violation
        );
        progress.on_protocol_violation(violation);
        let text = response.text_content();
        self.conversation_logger.log(ConversationEvent::new(
            "protocol_violation",
            serde_json::json!({
                "tool": input.tool.as_str(),
                "violation": violation.as_str(),
                "count": protocol.violations(),
                "text": truncate_str(&text, 500),
            }),
        ));

        if protocol.violation_budget_exhausted() {
            return Err(GenerateTipError::ProtocolViolation {
                violation,
                count: protocol.violations(),
            });
        }
        Ok(())
    }

    async fn run_evidence(
        &self,
        call: &ToolCall,
        tool: &ToolName,
        progress: &dyn TipProgressNotifier,
    ) -> ToolResult {
        let subject = call.get_string(NAME_ARG).unwrap_or(tool.as_str());
        progress.on_tool_call(&call.tool_name, subject);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            serde_json::json!({
                "tool_name": call.tool_name,
                "arguments": call.arguments,
            }),
        ));

        let result = self.evidence.execute(call).await;

        let found = result.output().is_some();
        progress.on_tool_result(&call.tool_name, found);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_result",
            serde_json::json!({
                "tool_name": call.tool_name,
                "success": result.is_success(),
                "found": found,
                "bytes": result.metadata.bytes,
                "truncated": result.metadata.truncated,
                "duration_ms": result.metadata.duration_ms,
                "error": result.error().map(|e| e.to_string()),
            }),
        ));
        result
    }

    /// Refuse `rejected` and ask the engine to try again.
    ///
    /// Tool calls in a refused response are answered with error results so
    /// the conversation stays well-formed.
    async fn reprompt(
        &self,
        session: &dyn LlmSession,
        rejected: &LlmResponse,
        violation: ProtocolViolation,
        tool: &ToolName,
        protocol: &TipProtocol,
        spec: &ToolSpec,
    ) -> Result<LlmResponse, GatewayError> {
        let correction = TipPromptTemplate::correction(violation, tool);
        let tools = self.offered_tools(protocol, spec);

        let mut messages = Vec::new();
        for call in rejected.tool_calls() {
            let refused = ToolResult::failure(&call.tool_name, ToolError::refused(&correction));
            push_result(&mut messages, &call, &refused, tool.as_str());
        }

        if messages.is_empty() {
            session.send_with_tools(&correction, &tools).await
        } else {
            session.send_tool_results(&messages, &tools).await
        }
    }

    /// JSON schemas for the tools the protocol allows this turn.
    fn offered_tools(&self, protocol: &TipProtocol, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut offered = ToolSpec::new();
        if protocol.offers_evidence() {
            for def in spec.evidence_tools() {
                offered = offered.register(def.clone());
            }
        }
        if protocol.offers_final_answer() {
            for def in spec.terminal_tools() {
                offered = offered.register(def.clone());
            }
        }
        self.tool_schema.all_tools_schema(&offered)
    }
}

fn push_result(
    messages: &mut Vec<ToolResultMessage>,
    call: &ToolCall,
    result: &ToolResult,
    subject: &str,
) {
    match call.native_id.clone() {
        Some(native_id) => messages.push(ToolResultMessage {
            tool_use_id: native_id,
            tool_name: call.tool_name.clone(),
            output: result.to_engine_text(subject),
            is_error: !result.is_success(),
        }),
        None => warn!(
            "Missing native_id for tool call '{}'; skipping result.",
            call.tool_name
        ),
    }
}
