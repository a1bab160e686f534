//! Git boundary for devflow
//!
//! This module provides:
//! - A timeout-bounded runner for every git invocation
//! - Worktree listing, parsing and per-record annotation
//! - The per-worktree uncommitted-changes probe

pub mod runner;
pub mod status;
pub mod worktree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use runner::{run_git, DEFAULT_GIT_TIMEOUT};
pub use status::{GitStatusProbe, StatusProbe};
pub use worktree::{
    annotate, list_worktrees, parse_worktree_list, AnnotateContext, PorcelainEntry,
};
