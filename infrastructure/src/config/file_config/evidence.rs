//! Evidence source settings (`evidence` section)

use super::ConfigError;
use crate::evidence::process::DEFAULT_TIMEOUT_SECS;
use crate::evidence::{ProcessRunner, TldrProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw evidence configuration
///
/// ```toml
/// [evidence]
/// timeout_secs = 10                  # per external process
/// tldr_providers = ["tlrc", "tldr"]  # first one on PATH is used
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvidenceConfig {
    pub timeout_secs: u64,
    pub tldr_providers: Vec<String>,
}

impl Default for FileEvidenceConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tldr_providers: vec!["tlrc".to_string(), "tldr".to_string()],
        }
    }
}

impl FileEvidenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Zero("evidence.timeout_secs"));
        }
        Ok(())
    }

    pub fn process_runner(&self) -> ProcessRunner {
        ProcessRunner::new(Duration::from_secs(self.timeout_secs))
    }

    pub fn tldr_providers(&self) -> Vec<TldrProvider> {
        self.tldr_providers
            .iter()
            .map(|name| TldrProvider::named(name.trim()))
            .collect()
    }
}
