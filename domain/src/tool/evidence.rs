//! Evidence source capability
//!
//! The one operation every documentation channel implements. Implementations
//! live in the infrastructure layer; this trait only fixes the contract.

use super::entities::{ToolDefinition, ToolKind, ToolParameter};
use crate::core::tool_name::ToolName;

/// Name of the single argument every evidence tool takes.
pub const NAME_ARG: &str = "name";

pub const BREW_INFO: &str = "brew_info";
pub const MAN_PAGE: &str = "man_page";
pub const INFO_PAGE: &str = "info_page";
pub const TLDR_PAGE: &str = "tldr_page";
pub const HELP_FLAG: &str = "help_flag";
pub const PROBE: &str = "probe";
pub const SCRIPT_SOURCE: &str = "script_source";

/// A documentation or introspection channel for a single command.
///
/// `lookup` must never fail past its own boundary: a missing binary, a
/// non-zero exit, an I/O error or undecodable output all collapse to `None`.
/// Callers cannot tell "not installed" from "lookup failed", and must not
/// need to.
pub trait EvidenceSource: Send + Sync {
    /// Tool name exposed to the reasoning engine (e.g. `man_page`)
    fn name(&self) -> &str;

    /// One-line description exposed to the reasoning engine
    fn description(&self) -> &str;

    /// Whether the executor may cut this source's text to the context budget
    fn truncatable(&self) -> bool {
        true
    }

    /// Fetch evidence for `tool`, or `None` when the source has nothing.
    fn lookup(&self, tool: &ToolName) -> Option<String>;

    /// Tool definition advertised to the engine
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), ToolKind::Evidence).with_parameter(
            ToolParameter::new(NAME_ARG, "Name of the command to look up", true),
        )
    }
}
