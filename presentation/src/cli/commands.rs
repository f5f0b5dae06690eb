//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for generate-tip
#[derive(Parser, Debug)]
#[command(name = "generate-tip")]
#[command(author, version, about = "Write a short usage tip for a CLI tool with a local LLM")]
#[command(long_about = r#"
Gathers documentation for a command from local sources (brew, man, info,
tldr, --help, the executable itself) and asks a local Ollama model to turn
it into a one or two sentence tip.

The tip is printed, written to TIP_FILE and cached in CACHE_JSON under the
command's name together with the current time.

Configuration is loaded from (in priority order):
1. --model <id>                                  Model override
2. --config <path>                               Explicit config file
3. ~/.local/share/zsh-tips-agent/config.json     Global config (or config.toml)
   <executable dir>/config.json                  Fallback
4. ZSH_TIP_MODEL                                 Model id from the environment

Example:
  generate-tip rg ~/.cache/zsh-tips/cache.json ~/.cache/zsh-tips/tip.txt
  generate-tip --model llama3.1:8b -v fd cache.json tip.txt
"#)]
pub struct Cli {
    /// Command to write a tip for
    #[arg(required_unless_present = "show_config")]
    pub tool: Option<String>,

    /// JSON file caching tips per command
    #[arg(value_name = "CACHE_JSON", required_unless_present = "show_config")]
    pub cache: Option<PathBuf>,

    /// File overwritten with the new tip
    #[arg(value_name = "TIP_FILE", required_unless_present = "show_config")]
    pub tip_file: Option<PathBuf>,

    /// Path to configuration file (JSON or TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ollama model to use, overriding all configuration
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Append a JSONL transcript of the invocation to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Show configuration sources and the resolved model, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Filter directive for the diagnostic log
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
