//! Presentation layer for zsh-tips-agent
//!
//! This crate contains the CLI definition, progress reporters and console
//! formatting. Everything except the tip itself goes to stderr.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{SimpleProgress, TipProgressReporter};
