//! Terminal rendering for snapshots

mod servers;
mod worktrees;

pub use servers::{format_server_status, server_lines};
pub use worktrees::{format_changes, forest_lines, node_label};
