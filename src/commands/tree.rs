use anyhow::Result;
use colored::Colorize;

use super::display::forest_lines;
use crate::error::ScanError;
use crate::forest::apply_change_overlay;
use crate::git::GitStatusProbe;
use crate::models::worktree::WorktreeNode;
use crate::scan::{scan_forest, ScanContext};

/// Print the worktree forest.
///
/// An unavailable listing prints one warning to stderr and an empty forest,
/// the same way the dashboard degrades.
pub fn execute(ctx: &ScanContext, json: bool, no_status: bool) -> Result<()> {
    let (forest, listing_error) = load_forest(ctx, no_status);
    if let Some(err) = &listing_error {
        eprintln!("{} {err}", "warning:".yellow().bold());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&forest)?);
    } else if forest.is_empty() {
        println!("{}", "(no worktrees)".dimmed());
    } else {
        for line in forest_lines(&forest) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Scan the forest, applying the change overlay unless `no_status`.
pub fn load_forest(ctx: &ScanContext, no_status: bool) -> (Vec<WorktreeNode>, Option<ScanError>) {
    let mut forest = match scan_forest(ctx) {
        Ok((_, forest)) => forest,
        Err(e) => return (Vec::new(), Some(e)),
    };

    if !no_status {
        let probe = GitStatusProbe::new(ctx.config.command_timeout());
        apply_change_overlay(&mut forest, &probe);
    }
    (forest, None)
}
