//! Binary/text classification for executables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes inspected when classifying a file.
pub const SNIFF_LEN: usize = 1024;

/// Whether the file at `path` looks binary.
///
/// A null byte within the first [`SNIFF_LEN`] bytes means binary. A file
/// that cannot be opened or read counts as binary so it is never read as
/// source.
pub fn looks_binary(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return true;
    };

    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    match file.take(SNIFF_LEN as u64).read_to_end(&mut prefix) {
        Ok(_) => prefix.contains(&0),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_text_file() {
        let file = write_temp(b"#!/bin/sh\necho hi\n");
        assert!(!looks_binary(file.path()));
    }

    #[test]
    fn test_null_in_prefix_is_binary() {
        let mut bytes = b"\x7fELF".to_vec();
        bytes.push(0);
        bytes.extend_from_slice(b"rest of the file is plain text");
        let file = write_temp(&bytes);
        assert!(looks_binary(file.path()));
    }

    #[test]
    fn test_null_after_prefix_is_text() {
        let mut bytes = vec![b'a'; SNIFF_LEN];
        bytes.push(0);
        let file = write_temp(&bytes);
        assert!(!looks_binary(file.path()));
    }

    #[test]
    fn test_null_at_last_prefix_byte_is_binary() {
        let mut bytes = vec![b'a'; SNIFF_LEN - 1];
        bytes.push(0);
        let file = write_temp(&bytes);
        assert!(looks_binary(file.path()));
    }

    #[test]
    fn test_empty_file_is_text() {
        let file = write_temp(b"");
        assert!(!looks_binary(file.path()));
    }

    #[test]
    fn test_missing_file_is_binary() {
        assert!(looks_binary(Path::new("/nonexistent/fakecmd123")));
    }
}
