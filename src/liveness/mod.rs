//! Liveness of auxiliary MCP servers from on-disk pid files
//!
//! Layout: `<mcp_dir>/pids/<server>.pid`, each holding a decimal pid.
//!
//! Reading status may mutate the pid directory: a pid file naming a dead
//! process is reported `Stopped` and then removed, so the next call reports
//! `NotStarted` for the same server.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use crate::models::server::ServerStatus;
use crate::process::{ProcessProbe, SignalProbe};


/// Get the path to the pids directory
pub fn pids_dir(mcp_dir: &Path) -> PathBuf {
    mcp_dir.join("pids")
}

/// Evaluates server status against a pid directory.
#[derive(Debug, Clone)]
pub struct LivenessTracker<P = SignalProbe> {
    pids_dir: PathBuf,
    probe: P,
}

impl LivenessTracker<SignalProbe> {
    pub fn new(pids_dir: impl Into<PathBuf>) -> Self {
        Self::with_probe(pids_dir, SignalProbe)
    }
}

impl<P: ProcessProbe> LivenessTracker<P> {
    pub fn with_probe(pids_dir: impl Into<PathBuf>, probe: P) -> Self {
        Self {
            pids_dir: pids_dir.into(),
            probe,
        }
    }

    pub fn pids_dir(&self) -> &Path {
        &self.pids_dir
    }

    /// Get the path to a PID file for a server
    pub fn pid_file_path(&self, server: &str) -> PathBuf {
        self.pids_dir.join(format!("{server}.pid"))
    }

    /// Status of every named server.
    ///
    /// When the pid directory is missing, every server is `NotConfigured`
    /// without looking for individual files. Stale pid files are removed as a
    /// side effect; removal failures are ignored and never change the result.
    pub fn status<I, S>(&self, servers: I) -> BTreeMap<String, ServerStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = servers.into_iter().map(|name| name.as_ref().to_string());

        if !self.pids_dir.is_dir() {
            debug!(dir = %self.pids_dir.display(), "pid directory missing");
            return names
                .map(|name| (name, ServerStatus::NotConfigured))
                .collect();
        }

        names
            .map(|name| {
                let status = self.server_status(&name);
                (name, status)
            })
            .collect()
    }

    fn server_status(&self, server: &str) -> ServerStatus {
        if !is_plain_name(server) {
            warn!(server, "server name is not a plain file name");
            return ServerStatus::Unknown;
        }

        let path = self.pid_file_path(server);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return ServerStatus::NotStarted,
            Err(e) if e.kind() == ErrorKind::InvalidData => return ServerStatus::Stopped,
            Err(e) => {
                warn!(server, path = %path.display(), error = %e, "failed to read pid file");
                return ServerStatus::Unknown;
            }
        };

        // pid 0 would probe our own process group, never a server
        let pid = match content.trim().parse::<u32>() {
            Ok(pid) if pid != 0 => pid,
            _ => return ServerStatus::Stopped,
        };

        if self.probe.is_alive(pid) {
            return ServerStatus::Running;
        }

        if let Err(e) = fs::remove_file(&path) {
            debug!(server, path = %path.display(), error = %e, "stale pid file not removed");
        }
        ServerStatus::Stopped
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
