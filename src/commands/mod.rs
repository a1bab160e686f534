pub mod common;
pub mod display;
pub mod mcp;
pub mod new;
pub mod passthrough;
pub mod servers;
pub mod status;
pub mod tree;
