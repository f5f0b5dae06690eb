//! Application-level configuration.
//!
//! - [`ExecutionParams`]: tip loop control (tool turns, violation budget)

pub mod execution_params;

pub use execution_params::ExecutionParams;
