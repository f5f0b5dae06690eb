//! Tip output file

use super::ensure_parent;
use std::path::{Path, PathBuf};
use tips_application::{TipOutputPort, TipStoreError};
use tips_domain::Tip;

/// Overwrites a file with the tip followed by a newline.
pub struct TipFileWriter {
    path: PathBuf,
}

impl TipFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TipOutputPort for TipFileWriter {
    fn write_tip(&self, tip: &Tip) -> Result<(), TipStoreError> {
        ensure_parent(&self.path)?;
        std::fs::write(&self.path, format!("{}\n", tip))
            .map_err(|e| TipStoreError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_overwrites_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tips").join("current.txt");
        let writer = TipFileWriter::new(&path);

        writer.write_tip(&Tip::new("first tip").unwrap()).unwrap();
        writer.write_tip(&Tip::new("Try fd -e rs.").unwrap()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Try fd -e rs.\n");
    }

    #[test]
    fn test_write_into_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TipFileWriter::new(dir.path());
        assert!(writer.write_tip(&Tip::new("tip").unwrap()).is_err());
    }
}
