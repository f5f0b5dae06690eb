//! Model value objects representing the tip-writing LLM

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default model identifier when nothing is configured.
pub const DEFAULT_MODEL_ID: &str = "gemma3";

/// Context size assumed when neither the config nor the model server says otherwise.
pub const DEFAULT_CONTEXT_TOKENS: u32 = 4096;

/// A model identifier as understood by the model server (Value Object).
///
/// Identifiers are free-form (`gemma3`, `llama3.1:8b`, `qwen2.5-coder:7b`)
/// because the set of locally pulled models is open.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Model {
    /// Returns the default model (gemma3)
    fn default() -> Self {
        Model::new(DEFAULT_MODEL_ID)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Model::new(s.trim()))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::new(s))
    }
}

/// Resolved model configuration for one invocation.
///
/// Read-only once built: the model identifier, an opaque parameter mapping
/// forwarded verbatim to the reasoning engine, and the context size used to
/// bound evidence text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: Model,
    /// Free-form engine parameters (e.g. `temperature`, `num_ctx`).
    pub params: serde_json::Map<String, serde_json::Value>,
    /// Maximum input size of the model, in tokens.
    pub context_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            params: serde_json::Map::new(),
            context_tokens: DEFAULT_CONTEXT_TOKENS,
        }
    }
}

impl ModelConfig {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    pub fn with_params(mut self, params: serde_json::Map<String, serde_json::Value>) -> Self {
        self.params = params;
        self
    }

    pub fn with_context_tokens(mut self, tokens: u32) -> Self {
        self.context_tokens = tokens;
        self
    }

    /// `num_ctx` from the parameter mapping, when it is a positive integer.
    ///
    /// Accepts both numbers and numeric strings since config files written
    /// by hand use either.
    pub fn num_ctx_param(&self) -> Option<u32> {
        let value = self.params.get("num_ctx")?;
        let parsed = match value {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }?;
        u32::try_from(parsed).ok().filter(|n| *n > 0)
    }
}
