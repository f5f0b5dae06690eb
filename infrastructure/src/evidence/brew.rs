//! Package manager metadata: `brew info <name>`

use super::non_empty;
use super::process::ProcessRunner;
use tips_domain::ToolName;
use tips_domain::tool::evidence::{BREW_INFO, EvidenceSource};
use tracing::debug;

pub struct BrewInfo {
    runner: ProcessRunner,
}

impl BrewInfo {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

impl EvidenceSource for BrewInfo {
    fn name(&self) -> &str {
        BREW_INFO
    }

    fn description(&self) -> &str {
        "Full `brew info` output: package description, homepage and install state"
    }

    /// Brew metadata is short and its header carries the description.
    fn truncatable(&self) -> bool {
        false
    }

    fn lookup(&self, tool: &ToolName) -> Option<String> {
        let output = self.runner.run("brew", &["info", tool.as_str()])?;
        if !output.success() {
            debug!("brew info {} exited with {}", tool, output.status);
            return None;
        }
        non_empty(output.stdout_lossy())
    }
}
