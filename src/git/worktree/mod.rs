//! Git worktree topology
//!
//! ## Module structure
//!
//! - `annotate`: Derived fields (display name, current marker, sidecar task id)
//! - `listing`: Runs `git worktree list --porcelain`
//! - `parser`: Porcelain output parsing

mod annotate;
mod listing;
mod parser;

pub use annotate::{annotate, find_task_id, AnnotateContext, ROOT_DISPLAY_NAME};
pub use listing::list_worktrees;
pub use parser::{parse_worktree_list, PorcelainEntry};
