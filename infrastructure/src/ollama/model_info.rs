//! Context size discovery via `ollama show`

use crate::evidence::ProcessRunner;
use tips_domain::Model;
use tracing::debug;

/// Context length from `ollama show` output.
///
/// The first line mentioning `num_ctx` or `context length` decides; its last
/// whitespace-separated token must be a positive integer.
pub fn parse_context_length(output: &str) -> Option<u32> {
    let line = output.lines().find(|line| {
        let lower = line.to_lowercase();
        lower.contains("num_ctx") || lower.contains("context length")
    })?;
    line.split_whitespace()
        .last()?
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
}

/// Ask the local Ollama install for `model`'s context length.
pub fn discover_context_length(runner: &ProcessRunner, model: &Model) -> Option<u32> {
    let output = runner.run("ollama", &["show", model.as_str()])?;
    if !output.success() {
        debug!("ollama show {} failed", model);
        return None;
    }
    let tokens = parse_context_length(&output.stdout_lossy());
    debug!("ollama show {} reports context length {:?}", model, tokens);
    tokens
}
