pub mod server;
pub mod worktree;
