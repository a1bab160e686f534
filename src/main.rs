use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use devflow::commands::mcp::McpAction;
use devflow::commands::{common, mcp, new, servers, status, tree};
use devflow::completions::{generate_completions, Shell};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "devflow")]
#[command(about = "Worktree and MCP server dashboard for a development environment", long_about = None)]
#[command(version)]
struct Cli {
    /// Repository to inspect (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    repo: Option<PathBuf>,

    /// Root worktree path (defaults to the main worktree)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Verbose logging to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show worktrees and server statuses (default)
    Status {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the worktree hierarchy
    Tree {
        /// Print the forest as JSON
        #[arg(long)]
        json: bool,

        /// Skip the uncommitted-changes check
        #[arg(long)]
        no_status: bool,
    },

    /// Show MCP server statuses
    Servers {
        /// Print statuses as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a worktree through the development shell
    New {
        /// Branch for the new worktree
        branch: String,

        /// Worktree to nest the new one under
        #[arg(long)]
        parent: Option<String>,
    },

    /// Start or stop MCP servers through the development shell
    Mcp {
        #[arg(value_enum)]
        action: McpAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (repo, root) = (cli.repo, cli.root);
    let ctx = || common::scan_context(repo.as_deref(), root.clone());

    match cli.command.unwrap_or(Commands::Status { json: false }) {
        Commands::Status { json } => status::execute(&ctx()?, json),
        Commands::Tree { json, no_status } => tree::execute(&ctx()?, json, no_status),
        Commands::Servers { json } => servers::execute(&ctx()?, json),
        Commands::New { branch, parent } => new::execute(&ctx()?, &branch, parent.as_deref()),
        Commands::Mcp { action } => mcp::execute(&ctx()?, action),
        Commands::Completions { shell } => {
            let shell = Shell::from_str(&shell)?;
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell, &mut std::io::stdout());
            Ok(())
        }
    }
}
