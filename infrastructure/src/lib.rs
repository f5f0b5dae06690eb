//! Infrastructure layer for zsh-tips-agent
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: local evidence sources, the Ollama gateway, file-backed
//! tip storage, transcript logging and configuration loading.

pub mod config;
pub mod evidence;
pub mod logging;
pub mod ollama;
pub mod persistence;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use evidence::{ProcessRunner, TldrProvider, default_sources};
pub use logging::JsonlConversationLogger;
pub use ollama::{OllamaGateway, discover_context_length};
pub use persistence::{JsonTipCache, TipFileWriter};
pub use tools::{EvidenceBudget, JsonSchemaToolConverter, LocalEvidenceExecutor};
