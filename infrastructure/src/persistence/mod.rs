//! File-backed tip storage
//!
//! - [`JsonTipCache`]: `ToolName → {"tip", "last_shown"}` JSON object
//! - [`TipFileWriter`]: plain-text file holding the latest tip

mod json_cache;
mod tip_file;

pub use json_cache::JsonTipCache;
pub use tip_file::TipFileWriter;

use std::path::Path;
use tips_application::TipStoreError;

/// Create the parent directory of `path` if it is missing.
fn ensure_parent(path: &Path) -> Result<(), TipStoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| TipStoreError::io(parent, e))
        }
        _ => Ok(()),
    }
}
