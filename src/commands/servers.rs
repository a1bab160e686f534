use anyhow::Result;

use super::display::server_lines;
use crate::scan::{server_entries, ScanContext};

/// Print the status of every configured MCP server.
pub fn execute(ctx: &ScanContext, json: bool) -> Result<()> {
    let entries = server_entries(&ctx.config, &ctx.liveness_tracker());

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No servers configured");
    }
    for line in server_lines(&entries) {
        println!("{line}");
    }
    Ok(())
}
