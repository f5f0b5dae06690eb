//! `<name> --help` output

use super::non_empty;
use super::process::ProcessRunner;
use tips_domain::ToolName;
use tips_domain::tool::evidence::{EvidenceSource, HELP_FLAG};

pub struct HelpFlag {
    runner: ProcessRunner,
}

impl HelpFlag {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

impl EvidenceSource for HelpFlag {
    fn name(&self) -> &str {
        HELP_FLAG
    }

    fn description(&self) -> &str {
        "Output from `<command> --help`, if available"
    }

    fn lookup(&self, tool: &ToolName) -> Option<String> {
        let output = self.runner.run(tool.as_str(), &["--help"])?;
        if !output.success() {
            return None;
        }
        non_empty(output.combined_lossy())
    }
}
