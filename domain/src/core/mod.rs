//! Core domain concepts shared across all subdomains.
//!
//! - [`tool_name::ToolName`]: the command a tip is written for
//! - [`tip::Tip`]: the terminal output of one invocation
//! - [`model::Model`] / [`model::ModelConfig`]: which model writes the tip
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod tip;
pub mod tool_name;
