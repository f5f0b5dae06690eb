//! Tip persistence ports
//!
//! The tip cache keeps the latest tip per tool; the tip file holds the
//! tip most recently generated.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tips_domain::{Tip, ToolName};

/// One cached tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub tip: Tip,
    /// Epoch seconds when the tip was generated
    pub last_shown: i64,
}

#[derive(Error, Debug)]
pub enum TipStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TipStoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Keyed tip cache. Writing an entry replaces any previous one for the
/// same tool and leaves other tools untouched.
pub trait TipCachePort: Send + Sync {
    fn store(&self, tool: &ToolName, entry: &CacheEntry) -> Result<(), TipStoreError>;
}

/// Destination for the freshly generated tip text.
pub trait TipOutputPort: Send + Sync {
    fn write_tip(&self, tip: &Tip) -> Result<(), TipStoreError>;
}
