//! Console output for tip results

use colored::Colorize;
use tips_application::GenerateTipOutput;
use tips_domain::ModelConfig;

/// Formats what the binary prints
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The tip as printed on stdout
    pub fn tip(output: &GenerateTipOutput) -> String {
        output.tip.to_string()
    }

    /// One-line run summary for stderr
    pub fn summary(output: &GenerateTipOutput) -> String {
        let mut line = format!(
            "{} {} tool call{}",
            "done:".green().bold(),
            output.tool_calls,
            if output.tool_calls == 1 { "" } else { "s" }
        );
        if output.violations > 0 {
            line.push_str(&format!(
                ", {} rejected response{}",
                output.violations,
                if output.violations == 1 { "" } else { "s" }
            ));
        }
        line
    }

    /// Error line for stderr
    pub fn error(message: &str) -> String {
        format!("{} {}", "error:".red().bold(), message)
    }

    /// The resolved model configuration
    pub fn model_config(config: &ModelConfig) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Resolved model"));
        output.push_str(&format!("  {} {}\n", "model:".cyan(), config.model));
        output.push_str(&format!(
            "  {} {}\n",
            "context tokens:".cyan(),
            config.context_tokens
        ));
        if config.params.is_empty() {
            output.push_str(&format!("  {} {}\n", "params:".cyan(), "none".dimmed()));
        } else {
            let params = serde_json::to_string(&config.params).unwrap_or_default();
            output.push_str(&format!("  {} {}\n", "params:".cyan(), params));
        }
        output
    }

    fn header(title: &str) -> String {
        format!("{}\n", title.bold())
    }
}
