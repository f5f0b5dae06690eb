//! Raw configuration data types
//!
//! These structs mirror the config file exactly (JSON or TOML). Conversions
//! to the types the rest of the program uses live here too.

mod agent;
mod evidence;
mod ollama;

pub use agent::FileAgentConfig;
pub use evidence::FileEvidenceConfig;
pub use ollama::FileOllamaConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tips_domain::core::model::{DEFAULT_CONTEXT_TOKENS, DEFAULT_MODEL_ID};
use tips_domain::util::DEFAULT_CHARS_PER_TOKEN;
use tips_domain::{Model, ModelConfig};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("model_id cannot be empty")]
    EmptyModelId,

    #[error("{0} cannot be 0")]
    Zero(&'static str),

    #[error("truncation_ratio must be a positive number, got {0}")]
    InvalidTruncationRatio(f64),
}

/// Complete file configuration
///
/// # Example
///
/// ```json
/// {
///   "model_id": "gemma3",
///   "model_params": { "temperature": 0.7, "num_ctx": 8192 },
///   "ollama": { "base_url": "http://localhost:11434" },
///   "agent": { "max_tool_turns": 10 },
///   "evidence": { "timeout_secs": 10, "tldr_providers": ["tlrc", "tldr"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model served by Ollama
    pub model_id: String,
    /// Forwarded verbatim to the engine as Ollama `options`
    pub model_params: serde_json::Map<String, serde_json::Value>,
    /// Context size used when neither `num_ctx` nor `ollama show` says otherwise
    pub context_tokens: u32,
    /// Evidence characters kept per context token
    pub truncation_ratio: f64,
    pub ollama: FileOllamaConfig,
    pub agent: FileAgentConfig,
    pub evidence: FileEvidenceConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            model_params: serde_json::Map::new(),
            context_tokens: DEFAULT_CONTEXT_TOKENS,
            truncation_ratio: DEFAULT_CHARS_PER_TOKEN,
            ollama: FileOllamaConfig::default(),
            agent: FileAgentConfig::default(),
            evidence: FileEvidenceConfig::default(),
        }
    }
}

impl FileConfig {
    /// Reject values the program cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_id.trim().is_empty() {
            return Err(ConfigError::EmptyModelId);
        }
        if self.context_tokens == 0 {
            return Err(ConfigError::Zero("context_tokens"));
        }
        if !(self.truncation_ratio.is_finite() && self.truncation_ratio > 0.0) {
            return Err(ConfigError::InvalidTruncationRatio(self.truncation_ratio));
        }
        self.ollama.validate()?;
        self.agent.validate()?;
        self.evidence.validate()
    }

    pub fn model(&self) -> Model {
        Model::new(self.model_id.trim())
    }

    /// Resolve the model configuration for one invocation.
    ///
    /// The context size is `model_params.num_ctx` if set, else
    /// `context_tokens`. When that is still the default, `discover` is
    /// asked (normally `ollama show`); `None` keeps the default.
    pub fn model_config(&self, discover: impl FnOnce(&Model) -> Option<u32>) -> ModelConfig {
        let config = ModelConfig::new(self.model()).with_params(self.model_params.clone());
        let mut tokens = config.num_ctx_param().unwrap_or(self.context_tokens);
        if tokens == DEFAULT_CONTEXT_TOKENS {
            tokens = discover(&config.model).unwrap_or(tokens);
        }
        config.with_context_tokens(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.model_id, "gemma3");
        assert_eq!(config.context_tokens, 4096);
        assert_eq!(config.truncation_ratio, 3.5);
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.agent.max_tool_turns, 10);
        assert_eq!(config.agent.max_protocol_violations, 3);
        assert_eq!(config.evidence.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: FileConfig = serde_json::from_str(
            r#"{"model_id": "llama3.1:8b", "model_params": {"temperature": 0.2}, "agent": {"max_tool_turns": 4}}"#,
        )
        .unwrap();

        assert_eq!(config.model_id, "llama3.1:8b");
        assert_eq!(config.model_params["temperature"], 0.2);
        assert_eq!(config.agent.max_tool_turns, 4);
        assert_eq!(config.agent.max_protocol_violations, 3);
        assert_eq!(config.context_tokens, 4096);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = FileConfig {
            model_id: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyModelId)));

        let config = FileConfig {
            truncation_ratio: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTruncationRatio(_))
        ));

        let mut config = FileConfig::default();
        config.evidence.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Zero("evidence.timeout_secs"))
        ));
    }

    #[test]
    fn test_model_config_prefers_num_ctx() {
        let mut config = FileConfig::default();
        config
            .model_params
            .insert("num_ctx".to_string(), serde_json::json!(8192));

        let resolved = config.model_config(|_| panic!("discovery must not run"));
        assert_eq!(resolved.context_tokens, 8192);
        assert_eq!(resolved.params["num_ctx"], 8192);
    }

    #[test]
    fn test_model_config_discovers_default_size() {
        let config = FileConfig::default();
        let resolved = config.model_config(|model| {
            assert_eq!(model.as_str(), "gemma3");
            Some(131072)
        });
        assert_eq!(resolved.context_tokens, 131072);
    }

    #[test]
    fn test_model_config_discovery_failure_keeps_default() {
        let resolved = FileConfig::default().model_config(|_| None);
        assert_eq!(resolved.context_tokens, 4096);
    }

    #[test]
    fn test_model_config_explicit_context_tokens() {
        let config = FileConfig {
            context_tokens: 2048,
            ..Default::default()
        };
        let resolved = config.model_config(|_| Some(1));
        assert_eq!(resolved.context_tokens, 2048);
    }
}
