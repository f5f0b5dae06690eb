//! Local evidence executor, the concrete implementation of [`EvidenceExecutorPort`].
//!
//! # Execution Path
//!
//! ```text
//! EvidenceExecutorPort::execute()
//!   ├─ unknown tool        → failure (NOT_FOUND)
//!   ├─ bad `name` argument → failure (INVALID_ARGUMENT)
//!   └─ source.lookup()     → spawn_blocking, then tail-truncate to the budget
//! ```
//!
//! Sources block on child processes, so the lookup runs on the blocking pool.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tips_application::ports::evidence_executor::EvidenceExecutorPort;
use tips_domain::tool::validation::evidence_subject;
use tips_domain::util::DEFAULT_CHARS_PER_TOKEN;
use tips_domain::{
    EvidenceSource, ToolCall, ToolError, ToolName, ToolResult, ToolSpec, truncate_tail,
};
use tracing::{debug, warn};

/// How much evidence text one result may carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvidenceBudget {
    /// Context size of the model, in tokens
    pub context_tokens: u32,
    /// Characters kept per token
    pub chars_per_token: f64,
}

impl Default for EvidenceBudget {
    fn default() -> Self {
        Self {
            context_tokens: tips_domain::core::model::DEFAULT_CONTEXT_TOKENS,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

impl EvidenceBudget {
    pub fn new(context_tokens: u32, chars_per_token: f64) -> Self {
        Self {
            context_tokens,
            chars_per_token,
        }
    }
}

/// Executor that answers evidence calls from sources on the local machine.
#[derive(Clone)]
pub struct LocalEvidenceExecutor {
    tool_spec: ToolSpec,
    sources: HashMap<String, Arc<dyn EvidenceSource>>,
    budget: EvidenceBudget,
}

impl LocalEvidenceExecutor {
    pub fn new(sources: Vec<Arc<dyn EvidenceSource>>) -> Self {
        let mut tool_spec = ToolSpec::new();
        let mut by_name = HashMap::new();
        for source in sources {
            tool_spec = tool_spec.register(source.definition());
            by_name.insert(source.name().to_string(), source);
        }
        Self {
            tool_spec,
            sources: by_name,
            budget: EvidenceBudget::default(),
        }
    }

    pub fn with_budget(mut self, budget: EvidenceBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Resolve the source and subject of a call, or the failure to report.
    fn prepare(&self, call: &ToolCall) -> Result<(Arc<dyn EvidenceSource>, ToolName), ToolResult> {
        let Some(source) = self.sources.get(&call.tool_name) else {
            return Err(ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(&call.tool_name),
            ));
        };
        let subject =
            evidence_subject(call).map_err(|e| ToolResult::failure(&call.tool_name, e))?;
        Ok((Arc::clone(source), subject))
    }

    fn finish(
        &self,
        tool_name: &str,
        truncatable: bool,
        evidence: Option<String>,
        started: Instant,
    ) -> ToolResult {
        let (evidence, truncated) = match evidence {
            Some(text) if truncatable => self.truncate(text),
            other => (other, false),
        };
        if truncated {
            debug!("{} output cut to {} tokens", tool_name, self.budget.context_tokens);
        }
        ToolResult::from_evidence(tool_name, evidence)
            .with_truncated(truncated)
            .with_duration(started.elapsed().as_millis() as u64)
    }

    fn truncate(&self, text: String) -> (Option<String>, bool) {
        let kept = truncate_tail(
            &text,
            self.budget.context_tokens as usize,
            self.budget.chars_per_token,
        );
        if kept.len() == text.len() {
            return (Some(text), false);
        }
        let kept = kept.to_string();
        // A zero budget leaves nothing worth sending.
        if kept.is_empty() {
            (None, true)
        } else {
            (Some(kept), true)
        }
    }
}

#[async_trait]
impl EvidenceExecutorPort for LocalEvidenceExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let (source, subject) = match self.prepare(call) {
            Ok(prepared) => prepared,
            Err(failure) => return failure,
        };
        let truncatable = source.truncatable();
        let started = Instant::now();

        let evidence = match tokio::task::spawn_blocking(move || source.lookup(&subject)).await {
            Ok(evidence) => evidence,
            Err(e) => {
                warn!("{} lookup task failed: {}", call.tool_name, e);
                None
            }
        };

        self.finish(&call.tool_name, truncatable, evidence, started)
    }
}
