//! Reasoning engine response model.
//!
//! - [`response::LlmResponse`]: one structured reply from the engine
//! - [`response::ContentBlock`]: text or tool-use block inside a reply

pub mod response;
