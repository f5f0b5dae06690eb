//! Domain layer for zsh-tips-agent
//!
//! This crate contains the core value objects, tool definitions and the
//! tip protocol. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Evidence
//!
//! An **evidence source** is one documentation or introspection channel
//! (man page, tldr page, `--help` output, ...) queried for a single command
//! name. Every source answers with `Option<String>`: absence is the normal
//! "no information" outcome, never an error.
//!
//! ## Tip Protocol
//!
//! The reasoning engine that writes the tip is driven through an explicit
//! state machine ([`TipProtocol`]): at least one evidence call must happen
//! before a terminal answer is accepted, and exactly one terminal answer
//! ends the invocation.

pub mod core;
pub mod prompt;
pub mod protocol;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    model::{Model, ModelConfig},
    tip::Tip,
    tool_name::ToolName,
};
pub use prompt::TipPromptTemplate;
pub use protocol::{ProtocolState, ProtocolViolation, TipProtocol, TurnAction};
pub use session::response::{ContentBlock, LlmResponse, StopReason};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    evidence::EvidenceSource,
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
pub use util::{truncate_str, truncate_tail};
