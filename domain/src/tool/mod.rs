//! Tool domain module
//!
//! This module defines the tools the reasoning engine may call while writing
//! a tip, and the uniform contract every evidence source follows.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (evidence)   │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ evidence: brew_info, man_page, info_page, tldr_page,
//!        │            help_flag, probe, script_source
//!        └─ terminal: final_answer
//! ```
//!
//! # Tool Kinds
//!
//! | Kind | Examples | Effect on the protocol |
//! |------|----------|------------------------|
//! | **Evidence** | `man_page`, `probe` | Moves the protocol into *Gathering* |
//! | **Terminal** | `final_answer` | Ends the invocation with the tip |
//!
//! # Absence
//!
//! Every [`EvidenceSource`](evidence::EvidenceSource) returns
//! `Option<String>`. `None` means "unavailable or failed" and the two cases
//! are deliberately indistinguishable; a [`ToolResult`] carrying absence is
//! still a successful result. Only malformed calls (unknown tool, missing
//! argument) produce a [`ToolError`].

pub mod entities;
pub mod evidence;
pub mod terminal;
pub mod validation;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolKind, ToolSpec};
pub use evidence::EvidenceSource;
pub use value_objects::{ToolError, ToolResult};
