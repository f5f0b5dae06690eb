//! JSONL file writer for transcript events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying the payload
//! plus `type`, `timestamp`, `command` (the tool the tip is for) and `seq`.
//! The file is opened in append mode so successive invocations accumulate.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tips_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use tips_domain::ToolName;
use tracing::warn;

struct Sink {
    writer: BufWriter<File>,
    seq: u64,
}

/// JSONL transcript logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex`. Flushes after every record and on `Drop`.
pub struct JsonlConversationLogger {
    sink: Mutex<Sink>,
    command: String,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path` for one invocation.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened; transcripts are optional.
    pub fn new(path: impl AsRef<Path>, command: &ToolName) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            sink: Mutex::new(Sink {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            command: command.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: ConversationEvent, seq: u64) -> serde_json::Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut map = match event.payload {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), event.event_type.into());
        map.insert("timestamp".to_string(), timestamp.into());
        map.insert("command".to_string(), self.command.clone().into());
        map.insert("seq".to_string(), seq.into());
        serde_json::Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let record = self.record(event, sink.seq);
        sink.seq += 1;

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        let _ = writeln!(sink.writer, "{}", line);
        let _ = sink.writer.flush();
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn command() -> ToolName {
        ToolName::new("fd").unwrap()
    }

    #[test]
    fn test_writes_tip_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("transcript.jsonl");
        let logger = JsonlConversationLogger::new(&path, &command()).unwrap();

        logger.log(ConversationEvent::new(
            "tool_call",
            serde_json::json!({"tool": "man_page", "name": "fd"}),
        ));
        logger.log(ConversationEvent::new(
            "tip_response",
            serde_json::json!({"tip": "Try fd -e rs."}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "tool_call");
        assert_eq!(records[0]["tool"], "man_page");
        assert_eq!(records[0]["command"], "fd");
        assert_eq!(records[0]["seq"], 0);
        assert_eq!(records[1]["type"], "tip_response");
        assert_eq!(records[1]["seq"], 1);
        assert!(records[1]["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_non_object_payload_goes_under_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");
        let logger = JsonlConversationLogger::new(&path, &command()).unwrap();

        logger.log(ConversationEvent::new("note", serde_json::json!("plain")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "plain");
        assert_eq!(records[0]["type"], "note");
    }

    #[test]
    fn test_appends_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");

        for _ in 0..2 {
            let logger = JsonlConversationLogger::new(&path, &command()).unwrap();
            logger.log(ConversationEvent::new("tip_request", serde_json::json!({})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_unopenable_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file.
        assert!(JsonlConversationLogger::new(dir.path(), &command()).is_none());
    }
}
