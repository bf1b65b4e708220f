//! CLI Adapter.

mod generate;
mod init;
mod prompts;
mod statements;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "context-forge")]
#[command(version)]
#[command(
    about = "Assemble project context documents for AI coding assistants",
    long_about = None
)]
struct Cli {
    /// Log diagnostics at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed .context-forge/ and the starter statement and prompt documents
    #[clap(visible_alias = "i")]
    Init,
    /// Print the context for a project record
    #[clap(visible_alias = "g")]
    Generate {
        /// Project record JSON file
        #[arg(short, long)]
        project: std::path::PathBuf,
        /// Use the legacy single template instead of the section engine
        #[arg(long)]
        legacy: bool,
        /// MCP server to list in the tools section (repeatable)
        #[arg(long = "mcp-server")]
        mcp_servers: Vec<String>,
    },
    /// Manage context statements
    #[clap(visible_alias = "st")]
    Statements {
        #[command(subcommand)]
        command: statements::StatementCommands,
    },
    /// Inspect the system prompt catalog
    #[clap(visible_alias = "p")]
    Prompts {
        #[command(subcommand)]
        command: prompts::PromptCommands,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Init => init::run_init().map(|_| 0),
        Commands::Generate { project, legacy, mcp_servers } => {
            generate::run_generate(&project, legacy, mcp_servers).map(|_| 0)
        }
        Commands::Statements { command } => statements::run_statements(command).map(|_| 0),
        Commands::Prompts { command } => prompts::run_prompts(command),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
