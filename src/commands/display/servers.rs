use colored::{ColoredString, Colorize};

use crate::models::server::{ServerEntry, ServerStatus};

/// One aligned line per server: description then status.
pub fn server_lines(servers: &[ServerEntry]) -> Vec<String> {
    let width = servers
        .iter()
        .map(|s| s.description.chars().count())
        .max()
        .unwrap_or(0);

    servers
        .iter()
        .map(|s| {
            let description = format!("{:<width$}", s.description);
            format!("  {}  {}", description.cyan(), format_server_status(s.status))
        })
        .collect()
}

pub fn format_server_status(status: ServerStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        ServerStatus::Running => label.green(),
        ServerStatus::Stopped => label.red(),
        ServerStatus::NotConfigured | ServerStatus::NotStarted | ServerStatus::Unknown => {
            label.yellow()
        }
    }
}
