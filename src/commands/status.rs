use anyhow::Result;
use colored::Colorize;

use super::display::{forest_lines, server_lines};
use crate::git::GitStatusProbe;
use crate::scan::{refresh, ScanContext, Snapshot};

/// Show the dashboard: worktree forest plus server statuses.
///
/// A failed worktree listing is shown as a warning; server statuses are
/// still reported.
pub fn execute(ctx: &ScanContext, json: bool) -> Result<()> {
    let probe = GitStatusProbe::new(ctx.config.command_timeout());
    let snapshot = refresh(ctx, Some(&probe), &ctx.liveness_tracker());

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    for line in dashboard_lines(&snapshot) {
        println!("{line}");
    }
    Ok(())
}

pub fn dashboard_lines(snapshot: &Snapshot) -> Vec<String> {
    let mut lines = vec![
        "devflow".bold().blue().to_string(),
        "=".repeat(50),
        String::new(),
    ];

    let heading = format!("Worktrees ({})", snapshot.worktree_count());
    lines.push(heading.bold().to_string());
    match &snapshot.listing_error {
        Some(err) => lines.push(format!("  {} {err}", "warning:".yellow().bold())),
        None if snapshot.forest.is_empty() => lines.push("  (none)".dimmed().to_string()),
        None => lines.extend(forest_lines(&snapshot.forest)),
    }

    lines.push(String::new());
    let running = snapshot.servers.iter().filter(|s| s.status.is_running()).count();
    let heading = format!("MCP Servers ({running}/{} running)", snapshot.servers.len());
    lines.push(heading.bold().to_string());
    if snapshot.servers.is_empty() {
        lines.push("  (none configured)".dimmed().to_string());
    } else {
        lines.extend(server_lines(&snapshot.servers));
    }

    lines.push(String::new());
    lines.push(
        format!("Updated {}", snapshot.scanned_at.format("%H:%M:%S"))
            .dimmed()
            .to_string(),
    );
    lines
}
