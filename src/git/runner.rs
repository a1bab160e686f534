//! Git command runner abstraction
//!
//! Every git invocation goes through here so that a hung `git` (network
//! filesystem, stuck index lock) cannot stall a whole refresh cycle.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;
use wait_timeout::ChildExt;

use crate::error::CommandError;

/// Timeout used when the caller has no configured value
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Run a git command in `dir`, killing it if it outlives `timeout`.
///
/// Stdout and stderr are drained on their own threads while waiting, so a
/// chatty command cannot block on a full pipe.
pub fn run_git(args: &[&str], dir: &Path, timeout: Duration) -> Result<Output, CommandError> {
    let command = format!("git {}", args.join(" "));

    let mut child = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| CommandError::Spawn {
            command: command.clone(),
            source,
        })?;

    let deadline = Instant::now() + timeout;
    let stdout_rx = child.stdout.take().map(spawn_reader);
    let stderr_rx = child.stderr.take().map(spawn_reader);

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            kill_child(&mut child);
            return Err(CommandError::TimedOut { command, timeout });
        }
        Err(source) => {
            kill_child(&mut child);
            return Err(CommandError::Wait { command, source });
        }
    };

    // A process git left behind can keep the pipes open after git exits
    let (Some(stdout), Some(stderr)) = (
        collect_until(stdout_rx, deadline),
        collect_until(stderr_rx, deadline),
    ) else {
        debug!(%command, "output pipes still open at deadline");
        return Err(CommandError::TimedOut { command, timeout });
    };

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

/// First non-empty stderr line, or the exit status when stderr is silent.
pub fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("exited with {}", output.status))
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// `None` when the reader has not finished by `deadline`.
fn collect_until(rx: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Option<Vec<u8>> {
    let Some(rx) = rx else {
        return Some(Vec::new());
    };
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(buf) => Some(buf),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(Vec::new()),
    }
}

fn kill_child(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
