//! Progress reporting for tip generation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tips_application::TipProgressNotifier;
use tips_domain::{ProtocolViolation, ToolName};

/// Reports progress on stderr with a spinner
pub struct TipProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    verbose: bool,
}

impl TipProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            verbose: false,
        }
    }

    /// Also print one line per tool call
    pub fn verbose() -> Self {
        Self {
            bar: Mutex::new(None),
            verbose: true,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn set_message(&self, message: String) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(message);
        }
    }

    /// Print a line above the spinner.
    fn note(&self, line: String) {
        match self.bar.lock().ok().as_ref().and_then(|bar| bar.as_ref()) {
            Some(pb) => pb.println(line),
            None => eprintln!("{}", line),
        }
    }
}

impl Default for TipProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TipProgressNotifier for TipProgressReporter {
    fn on_start(&self, tool: &ToolName, model: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("tip for {}", tool));
        pb.set_message(format!("asking {}...", model));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_thinking(&self) {
        self.set_message("thinking...".to_string());
    }

    fn on_tool_call(&self, tool_name: &str, subject: &str) {
        self.set_message(format!("{} {}", tool_name, subject));
    }

    fn on_tool_result(&self, tool_name: &str, found: bool) {
        if self.verbose {
            if found {
                self.note(format!("  {} {}", "✓".green(), tool_name.green()));
            } else {
                self.note(format!(
                    "  {} {} {}",
                    "-".dimmed(),
                    tool_name.dimmed(),
                    "nothing".dimmed()
                ));
            }
        }
    }

    fn on_protocol_violation(&self, violation: ProtocolViolation) {
        self.note(format!("  {} model {}", "!".yellow(), violation));
    }

    fn on_finish(&self, _success: bool) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Plain-line progress on stderr (no spinner), for non-terminal output
pub struct SimpleProgress;

impl TipProgressNotifier for SimpleProgress {
    fn on_start(&self, tool: &ToolName, model: &str) {
        eprintln!("{} tip for {} with {}", "->".cyan(), tool.as_str().bold(), model);
    }

    fn on_tool_result(&self, tool_name: &str, found: bool) {
        if found {
            eprintln!("  {} {}", "v".green(), tool_name);
        } else {
            eprintln!("  {} {} (nothing)", "-".dimmed(), tool_name);
        }
    }

    fn on_protocol_violation(&self, violation: ProtocolViolation) {
        eprintln!("  {} model {}", "!".yellow(), violation);
    }
}
