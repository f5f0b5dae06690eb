//! Application layer for zsh-tips-agent
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    evidence_executor::EvidenceExecutorPort,
    llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage},
    progress::{NoTipProgress, TipProgressNotifier},
    tip_store::{CacheEntry, TipCachePort, TipOutputPort, TipStoreError},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::generate_tip::{
    GenerateTipError, GenerateTipInput, GenerateTipOutput, GenerateTipUseCase,
};
pub use use_cases::persist_tip::{PersistTipError, PersistTipUseCase};
