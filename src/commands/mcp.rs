use anyhow::Result;
use clap::ValueEnum;

use super::passthrough;
use crate::scan::ScanContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum McpAction {
    Start,
    Stop,
}

/// Start or stop the MCP servers through the configured scripts.
pub fn execute(ctx: &ScanContext, action: McpAction) -> Result<()> {
    let commands = &ctx.config.commands;
    let command = match action {
        McpAction::Start => &commands.mcp_start,
        McpAction::Stop => &commands.mcp_stop,
    };
    passthrough::run(commands, &ctx.repo_dir, command, &[])
}
