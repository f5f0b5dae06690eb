//! Progress notification port
//!
//! Reports what a tip invocation is doing while the engine works. The
//! presentation layer implements this with a terminal spinner.

use tips_domain::{ProtocolViolation, ToolName};

/// Callback for progress updates during tip generation
pub trait TipProgressNotifier: Send + Sync {
    /// The engine session has been created
    fn on_start(&self, _tool: &ToolName, _model: &str) {}

    /// Waiting on the engine
    fn on_thinking(&self) {}

    /// An evidence tool is about to run
    fn on_tool_call(&self, _tool_name: &str, _subject: &str) {}

    /// An evidence tool finished; `found` is false for absence and errors
    fn on_tool_result(&self, _tool_name: &str, _found: bool) {}

    fn on_protocol_violation(&self, _violation: ProtocolViolation) {}

    /// The invocation has ended, successfully or not
    fn on_finish(&self, _success: bool) {}
}

/// No-op progress notifier
pub struct NoTipProgress;

impl TipProgressNotifier for NoTipProgress {}
