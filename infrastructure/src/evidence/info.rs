//! GNU info pages

use super::non_empty;
use super::process::ProcessRunner;
use tips_domain::ToolName;
use tips_domain::tool::evidence::{EvidenceSource, INFO_PAGE};

pub struct InfoPage {
    runner: ProcessRunner,
}

impl InfoPage {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

impl EvidenceSource for InfoPage {
    fn name(&self) -> &str {
        INFO_PAGE
    }

    fn description(&self) -> &str {
        "GNU info page"
    }

    fn lookup(&self, tool: &ToolName) -> Option<String> {
        let output = self.runner.run("info", &[tool.as_str()])?;
        if !output.success() {
            return None;
        }
        let text = output.combined_lossy();
        // Some info versions fall back to the directory node with exit 0.
        if text.contains("No menu item") {
            return None;
        }
        non_empty(text)
    }
}
