//! Worktree forest: nesting inference and status overlay
//!
//! A worktree B is nested under A when B's path lies below `A/worktrees/`.
//! The flat listing from git carries no such relationship, so it is inferred
//! here and exposed as an ordered forest for rendering.

mod build;
mod overlay;

#[cfg(test)]
mod tests;

pub use build::{build_forest, build_forest_with, flatten, is_nested_under, NESTED_WORKTREES_DIR};
pub use overlay::{apply_change_overlay, overlay_workers};
