//! Bounded external process execution for evidence sources.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default wait for one evidence process (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Resolves an executable name to a path on `PATH`.
///
/// Injected into sources so the lookup can be replaced in tests.
pub type CommandResolver = Arc<dyn Fn(&str) -> Option<PathBuf> + Send + Sync>;

/// Resolver backed by the real `PATH`.
pub fn path_resolver() -> CommandResolver {
    Arc::new(|name: &str| which::which(name).ok())
}

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// stdout followed by stderr, as a terminal would interleave them
    pub fn combined_lossy(&self) -> String {
        let mut combined = String::from_utf8_lossy(&self.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&self.stderr));
        combined
    }
}

/// Runs short-lived processes with closed stdin and a bounded wait.
///
/// The bound covers the whole run: the child exiting and both output pipes
/// closing. A background process that inherits the pipes cannot stretch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `program` with `args` and capture its output.
    ///
    /// Returns `None` when the process cannot be spawned or does not finish
    /// within the timeout (it is killed). A non-zero exit is still returned.
    pub fn run(&self, program: &str, args: &[&str]) -> Option<ProcessOutput> {
        self.run_with_env(program, args, &[])
    }

    /// Like [`run`](Self::run) with extra environment variables.
    pub fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Option<ProcessOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .envs(env.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!("Failed to spawn {}: {}", program, e);
                return None;
            }
        };

        match wait_with_timeout(child, self.timeout) {
            Ok(output) => Some(output),
            Err(e) => {
                debug!("{} {:?}: {}", program, args, e);
                None
            }
        }
    }
}

/// Drain a pipe on its own thread so a chatty child never blocks on a full pipe.
///
/// The buffer arrives on the returned channel once every writer has closed
/// the pipe.
fn drain<R: Read + Send + 'static>(pipe: Option<R>, stream: &'static str) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe
            && let Err(e) = pipe.read_to_end(&mut buf)
        {
            debug!("Failed to read {}: {}", stream, e);
        }
        if tx.send(buf).is_err() {
            debug!("{} closed after the process was abandoned", stream);
        }
    });
    rx
}

/// Receive a drained pipe, giving up at `deadline`.
fn collect(rx: &Receiver<Vec<u8>>, stream: &str, deadline: Instant) -> Result<Vec<u8>, String> {
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(buf) => Ok(buf),
        Err(RecvTimeoutError::Timeout) => {
            Err(format!("{} still held open by a background process", stream))
        }
        Err(RecvTimeoutError::Disconnected) => {
            debug!("{} reader stopped without output", stream);
            Ok(Vec::new())
        }
    }
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("Failed to kill process {}: {}", child.id(), e);
    }
    if let Err(e) = child.wait() {
        debug!("Failed to reap process {}: {}", child.id(), e);
    }
}

/// Wait for a child process and its output, killing it after `timeout`.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<ProcessOutput, String> {
    let stdout = drain(child.stdout.take(), "stdout");
    let stderr = drain(child.stderr.take(), "stderr");
    let deadline = Instant::now() + timeout;

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    kill(&mut child);
                    return Err(format!("timed out after {:?}", timeout));
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            Err(e) => {
                kill(&mut child);
                return Err(format!("failed to wait for process: {}", e));
            }
        }
    };

    let stdout = collect(&stdout, "stdout", deadline)?;
    let stderr = collect(&stderr, "stderr", deadline)?;
    Ok(ProcessOutput {
        status,
        stdout,
        stderr,
    })
}
