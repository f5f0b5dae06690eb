//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod evidence_executor;
pub mod llm_gateway;
pub mod progress;
pub mod tip_store;
pub mod tool_schema;
