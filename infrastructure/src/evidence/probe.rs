//! Location and file type of a command

use super::process::{CommandResolver, ProcessRunner, path_resolver};
use std::path::Path;
use tips_domain::ToolName;
use tips_domain::tool::evidence::{EvidenceSource, PROBE};

/// File type reported when `file` cannot classify the target.
pub const UNKNOWN_FILE_TYPE: &str = "Unknown file type";

pub struct Probe {
    runner: ProcessRunner,
    resolve: CommandResolver,
}

impl Probe {
    pub fn new(runner: ProcessRunner) -> Self {
        Self {
            runner,
            resolve: path_resolver(),
        }
    }

    pub fn with_resolver(mut self, resolve: CommandResolver) -> Self {
        self.resolve = resolve;
        self
    }

    fn file_type(&self, path: &Path) -> String {
        let path = path.to_string_lossy();
        self.runner
            .run("file", &["--brief", "--mime", &path])
            .filter(|output| output.success())
            .map(|output| output.stdout_lossy().trim().to_string())
            .filter(|mime| !mime.is_empty())
            .unwrap_or_else(|| UNKNOWN_FILE_TYPE.to_string())
    }
}

impl EvidenceSource for Probe {
    fn name(&self) -> &str {
        PROBE
    }

    fn description(&self) -> &str {
        "Show the location and type of a command"
    }

    /// A command missing from `PATH` is reported as a message, not absence.
    fn lookup(&self, tool: &ToolName) -> Option<String> {
        let Some(found) = (self.resolve)(tool.as_str()) else {
            return Some(format!("Command '{}' not found in PATH.", tool));
        };

        let abs_path = std::fs::canonicalize(&found).unwrap_or(found);
        let directory = abs_path
            .parent()
            .map(|d| d.display().to_string())
            .unwrap_or_default();
        let file_type = self.file_type(&abs_path);
        let is_binary = file_type.contains("charset=binary");

        Some(format!(
            "Command: {}\nFull Path: {}\nDirectory: {}\nFile Type: {}\nIs Binary: {}",
            tool,
            abs_path.display(),
            directory,
            file_type,
            if is_binary { "Yes" } else { "No" }
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_not_found_message() {
        let probe = Probe::new(ProcessRunner::default()).with_resolver(Arc::new(|_: &str| None));
        assert_eq!(
            probe.lookup(&ToolName::new("fakecmd123").unwrap()).as_deref(),
            Some("Command 'fakecmd123' not found in PATH.")
        );
    }

    #[test]
    fn test_real_path_lookup_for_missing_command() {
        let probe = Probe::new(ProcessRunner::default());
        let report = probe.lookup(&ToolName::new("fakecmd123").unwrap()).unwrap();
        assert!(report.contains("not found in PATH"));
    }

    #[test]
    fn test_report_fields_for_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("hello");
        std::fs::File::create(&script)
            .unwrap()
            .write_all(b"#!/bin/sh\necho hello\n")
            .unwrap();

        let target: PathBuf = script.clone();
        let probe = Probe::new(ProcessRunner::default())
            .with_resolver(Arc::new(move |_: &str| Some(target.clone())));

        let report = probe.lookup(&ToolName::new("hello").unwrap()).unwrap();
        let canonical = std::fs::canonicalize(&script).unwrap();

        assert!(report.starts_with("Command: hello\n"));
        assert!(report.contains(&format!("Full Path: {}\n", canonical.display())));
        assert!(report.contains(&format!(
            "Directory: {}\n",
            canonical.parent().unwrap().display()
        )));
        assert!(report.contains("File Type: "));
        assert!(report.ends_with("Is Binary: No"));
    }
}
