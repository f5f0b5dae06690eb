//! JSON tip cache

use super::ensure_parent;
use std::path::PathBuf;
use tips_application::{CacheEntry, TipCachePort, TipStoreError};
use tips_domain::ToolName;
use tracing::{debug, warn};

type CacheMap = serde_json::Map<String, serde_json::Value>;

/// Tip cache stored as one pretty-printed JSON object.
///
/// Writes replace only the invoked tool's entry; other keys are carried
/// over as-is, even if they do not look like cache entries. Malformed or
/// non-object content is discarded and treated as empty.
pub struct JsonTipCache {
    path: PathBuf,
}

impl JsonTipCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> CacheMap {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Tip cache {} not readable: {}", self.path.display(), e);
                return CacheMap::new();
            }
        };
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => {
                warn!(
                    "Tip cache {} is not a JSON object, starting fresh",
                    self.path.display()
                );
                CacheMap::new()
            }
            Err(e) => {
                warn!(
                    "Tip cache {} is malformed ({}), starting fresh",
                    self.path.display(),
                    e
                );
                CacheMap::new()
            }
        }
    }
}

impl TipCachePort for JsonTipCache {
    fn store(&self, tool: &ToolName, entry: &CacheEntry) -> Result<(), TipStoreError> {
        let mut map = self.read_map();
        map.insert(tool.to_string(), serde_json::to_value(entry)?);

        ensure_parent(&self.path)?;
        let json = serde_json::to_string_pretty(&map)?;
        std::fs::write(&self.path, json).map_err(|e| TipStoreError::io(&self.path, e))
    }
}
