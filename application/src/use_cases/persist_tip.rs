//! Persist Tip use case.
//!
//! Records a generated tip in the cache under its tool name with the
//! current time, then writes the tip file.

use crate::ports::tip_store::{CacheEntry, TipCachePort, TipOutputPort, TipStoreError};
use std::sync::Arc;
use thiserror::Error;
use tips_domain::{Tip, ToolName};
use tracing::debug;

#[derive(Error, Debug)]
pub enum PersistTipError {
    #[error("Failed to persist tip: {0}")]
    Io(#[from] TipStoreError),
}

/// Source of `last_shown` timestamps (epoch seconds).
pub type Clock = fn() -> i64;

fn utc_now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub struct PersistTipUseCase {
    cache: Arc<dyn TipCachePort>,
    output: Arc<dyn TipOutputPort>,
    clock: Clock,
}

impl PersistTipUseCase {
    pub fn new(cache: Arc<dyn TipCachePort>, output: Arc<dyn TipOutputPort>) -> Self {
        Self {
            cache,
            output,
            clock: utc_now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Store `tip` for `tool` and write the tip file.
    pub fn execute(&self, tool: &ToolName, tip: &Tip) -> Result<CacheEntry, PersistTipError> {
        let entry = CacheEntry {
            tip: tip.clone(),
            last_shown: (self.clock)(),
        };

        self.cache.store(tool, &entry)?;
        self.output.write_tip(tip)?;
        debug!("Persisted tip for '{}' at {}", tool, entry.last_shown);

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryCache {
        entries: Mutex<HashMap<ToolName, CacheEntry>>,
    }

    impl TipCachePort for MemoryCache {
        fn store(&self, tool: &ToolName, entry: &CacheEntry) -> Result<(), TipStoreError> {
            self.entries
                .lock()
                .unwrap()
                .insert(tool.clone(), entry.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryOutput {
        written: Mutex<Vec<String>>,
    }

    impl TipOutputPort for MemoryOutput {
        fn write_tip(&self, tip: &Tip) -> Result<(), TipStoreError> {
            self.written.lock().unwrap().push(tip.to_string());
            Ok(())
        }
    }

    struct FailingOutput;

    impl TipOutputPort for FailingOutput {
        fn write_tip(&self, _tip: &Tip) -> Result<(), TipStoreError> {
            Err(TipStoreError::io(
                "/readonly/tip",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        }
    }

    fn fixed_clock() -> i64 {
        1_700_000_000
    }

    #[test]
    fn test_persist_overwrites_same_tool() {
        let cache = Arc::new(MemoryCache::default());
        let output = Arc::new(MemoryOutput::default());
        let use_case =
            PersistTipUseCase::new(cache.clone(), output.clone()).with_clock(fixed_clock);
        let tool = ToolName::new("jq").unwrap();

        use_case
            .execute(&tool, &Tip::new("first").unwrap())
            .unwrap();
        let entry = use_case
            .execute(&tool, &Tip::new("second").unwrap())
            .unwrap();

        assert_eq!(entry.last_shown, 1_700_000_000);
        let entries = cache.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[&tool].tip.as_str(), "second");
        assert_eq!(*output.written.lock().unwrap(), ["first", "second"]);
    }

    #[test]
    fn test_default_clock_is_current_time() {
        let use_case = PersistTipUseCase::new(
            Arc::new(MemoryCache::default()),
            Arc::new(MemoryOutput::default()),
        );
        let before = chrono::Utc::now().timestamp();
        let entry = use_case
            .execute(&ToolName::new("fd").unwrap(), &Tip::new("tip").unwrap())
            .unwrap();
        assert!(entry.last_shown >= before);
    }

    #[test]
    fn test_output_failure_is_error() {
        let use_case = PersistTipUseCase::new(Arc::new(MemoryCache::default()), Arc::new(FailingOutput));
        let err = use_case
            .execute(&ToolName::new("fd").unwrap(), &Tip::new("tip").unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("/readonly/tip"));
    }
}
