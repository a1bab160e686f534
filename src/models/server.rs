use serde::Serialize;
use std::fmt;

/// Run state of a named auxiliary (MCP) server, derived from its pid file.
///
/// Nothing here is persisted: the pid file plus OS-level liveness of the pid
/// it names is the only source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerStatus {
    /// The pid directory does not exist at all
    NotConfigured,
    /// No pid file for this server
    NotStarted,
    /// Pid file is empty, unparseable, or names a dead process
    Stopped,
    Running,
    /// The pid file could not be read
    Unknown,
}

impl ServerStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, ServerStatus::Running)
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServerStatus::NotConfigured => "not configured",
            ServerStatus::NotStarted => "not started",
            ServerStatus::Stopped => "stopped",
            ServerStatus::Running => "running",
            ServerStatus::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}

/// A configured server together with its evaluated status, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerEntry {
    pub name: String,
    pub description: String,
    pub status: ServerStatus,
}
