//! Tip value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A short, user-facing usage tip for one command (Value Object).
///
/// Produced exactly once per invocation by the tip protocol. The text is
/// passed through unmodified apart from trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tip(String);

impl Tip {
    pub fn new(text: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTip);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Tip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
