//! Prompt domain
//!
//! Instruction text handed to the reasoning engine at each step of a tip
//! invocation.

mod tip;

pub use tip::TipPromptTemplate;
