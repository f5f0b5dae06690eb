//! Configuration loading for zsh-tips-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--model <id>` (model id only)
//! 2. `--config <path>` specified file (JSON or TOML by extension)
//! 3. Global: `~/.local/share/zsh-tips-agent/config.json` or `config.toml`,
//!    else `config.json` next to the executable
//! 4. `ZSH_TIP_MODEL` environment variable (model id only)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileAgentConfig, FileConfig, FileEvidenceConfig, FileOllamaConfig,
};
pub use loader::{ConfigLoader, MODEL_ENV};
