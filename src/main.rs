use anyhow::Result;
use bollyinfo::core::log::init_logging;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for bollyinfo::AppCommand {
    fn from(cmd: Commands) -> bollyinfo::AppCommand {
        match cmd {
            Commands::Lookup { titles, csv, pdf } => {
                bollyinfo::AppCommand::Lookup { titles, csv, pdf }
            }
            Commands::Shell => bollyinfo::AppCommand::Shell,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Look up one or more movies and optionally export the results
    Lookup {
        /// Movie titles to look up
        #[arg(required = true)]
        titles: Vec<String>,
        /// Write the results as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the results as PDF to this path
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Start the interactive prompt (default)
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine; keys may come from the real environment or config
    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => bollyinfo::cli::setup::setup(),
        Some(cmd) => bollyinfo::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            bollyinfo::run_command(bollyinfo::AppCommand::Shell, cli.config_path.as_deref()).await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
