pub mod commands;
pub mod completions;
pub mod config;
pub mod error;
pub mod forest;
pub mod git;
pub mod liveness;
pub mod models;
pub mod process;
pub mod scan;
