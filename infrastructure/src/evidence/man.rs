//! Rendered man pages with terminal formatting removed

use super::non_empty;
use super::process::ProcessRunner;
use regex::Regex;
use std::sync::LazyLock;
use tips_domain::ToolName;
use tips_domain::tool::evidence::{EvidenceSource, MAN_PAGE};

/// `X\bX` (bold) and `_\bX` (underline): drop the character before each backspace.
static OVERSTRIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x08]\x08").expect("valid overstrike regex"));

/// ANSI SGR sequences such as `\x1b[1m`.
static ANSI_SGR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid SGR regex"));

/// Remove overstrike and color sequences from rendered man output.
pub fn strip_formatting(text: &str) -> String {
    let text = ANSI_SGR.replace_all(text, "");
    let text = OVERSTRIKE.replace_all(&text, "");
    // Stray backspaces with nothing before them.
    text.replace('\x08', "")
}

pub struct ManPage {
    runner: ProcessRunner,
}

impl ManPage {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

impl EvidenceSource for ManPage {
    fn name(&self) -> &str {
        MAN_PAGE
    }

    fn description(&self) -> &str {
        "Rendered man page as plain text"
    }

    fn lookup(&self, tool: &ToolName) -> Option<String> {
        let output = self.runner.run_with_env(
            "man",
            &[tool.as_str()],
            &[("MANPAGER", "cat"), ("PAGER", "cat"), ("MANWIDTH", "80")],
        )?;
        if !output.success() {
            return None;
        }
        non_empty(strip_formatting(&output.stdout_lossy()))
    }
}
