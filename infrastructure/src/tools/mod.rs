//! Tool execution for the tip agent
//!
//! [`LocalEvidenceExecutor`] dispatches evidence calls to the registered
//! [`EvidenceSource`](tips_domain::EvidenceSource)s and
//! [`JsonSchemaToolConverter`] advertises them to the engine.

mod executor;
mod schema;

pub use executor::{EvidenceBudget, LocalEvidenceExecutor};
pub use schema::JsonSchemaToolConverter;
