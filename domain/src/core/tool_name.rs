//! ToolName value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The command a tip is generated for (Value Object).
///
/// This is the sole input key across every evidence source and the tip
/// cache. Surrounding whitespace is removed on construction and a blank
/// name is rejected, so holding a `ToolName` means the invocation is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolName(String);

impl ToolName {
    /// Create a tool name, trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidToolName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ToolName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ToolName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToolName> for String {
    fn from(name: ToolName) -> Self {
        name.0
    }
}

impl AsRef<str> for ToolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_trims() {
        let name = ToolName::new("  grep \n").unwrap();
        assert_eq!(name.as_str(), "grep");
        assert_eq!(name.to_string(), "grep");
    }

    #[test]
    fn test_blank_tool_name_rejected() {
        assert_eq!(ToolName::new(""), Err(DomainError::InvalidToolName));
        assert_eq!(ToolName::new("   \t"), Err(DomainError::InvalidToolName));
    }

    #[test]
    fn test_tool_name_parse() {
        let name: ToolName = "fd".parse().unwrap();
        assert_eq!(name.as_str(), "fd");
        assert!("".parse::<ToolName>().is_err());
    }

    #[test]
    fn test_tool_name_serde_rejects_blank() {
        let ok: ToolName = serde_json::from_str("\"jq\"").unwrap();
        assert_eq!(ok.as_str(), "jq");
        assert!(serde_json::from_str::<ToolName>("\"  \"").is_err());
    }
}
