//! Full source of text-based commands (shell scripts, Python entry points, ...)

use super::classify::looks_binary;
use super::process::{CommandResolver, path_resolver};
use tips_domain::ToolName;
use tips_domain::tool::evidence::{EvidenceSource, SCRIPT_SOURCE};
use tracing::debug;

pub struct ScriptSource {
    resolve: CommandResolver,
}

impl Default for ScriptSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptSource {
    pub fn new() -> Self {
        Self {
            resolve: path_resolver(),
        }
    }

    pub fn with_resolver(mut self, resolve: CommandResolver) -> Self {
        self.resolve = resolve;
        self
    }
}

impl EvidenceSource for ScriptSource {
    fn name(&self) -> &str {
        SCRIPT_SOURCE
    }

    fn description(&self) -> &str {
        "Inspect the entire command source, if it is a text script"
    }

    fn lookup(&self, tool: &ToolName) -> Option<String> {
        let path = (self.resolve)(tool.as_str())?;
        if looks_binary(&path) {
            debug!("{} is binary, not reading source", path.display());
            return None;
        }
        match std::fs::read(&path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }
}
