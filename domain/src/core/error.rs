//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool name is missing or blank")]
    InvalidToolName,

    #[error("Tip cannot be empty")]
    EmptyTip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::InvalidToolName.to_string(),
            "Tool name is missing or blank"
        );
        assert_eq!(DomainError::EmptyTip.to_string(), "Tip cannot be empty");
    }
}
