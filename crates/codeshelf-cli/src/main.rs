//! Codeshelf CLI
//!
//! Command-line interface for the snippet shelf

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use codeshelf_core::logging_facility;
use codeshelf_store::SqliteStore;

mod commands;
mod config;

use commands::CliError;
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "codeshelf")]
#[command(about = "Codeshelf - keep, filter and favorite code snippets", long_about = None)]
struct Cli {
    /// SQLite database file (env: CODESHELF_DB, default: .codeshelf/store.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log profile: development, production or test (env: CODESHELF_LOG, default: production)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List snippets, optionally filtered
    List(commands::list::ListArgs),
    /// Show one snippet
    Show(commands::snippet::ShowArgs),
    /// Create a snippet
    Create(commands::snippet::CreateArgs),
    /// Edit a snippet; omitted fields keep their stored value
    Edit(commands::snippet::EditArgs),
    /// Flip the favorite flag of a snippet
    Toggle(commands::snippet::ToggleArgs),
    /// Delete a snippet (asks for --yes first)
    Delete(commands::snippet::DeleteArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::resolve(cli.db, cli.log).map_err(CliError::Config)?;
    logging_facility::init(config.log_profile);
    tracing::debug!(db = %config.db_path.display(), profile = ?config.log_profile, "configuration resolved");

    let mut store = SqliteStore::open(&config.db_path)?;

    match cli.command {
        Commands::List(args) => commands::list::execute(&mut store, args),
        Commands::Show(args) => commands::snippet::show(&mut store, args),
        Commands::Create(args) => commands::snippet::create(&mut store, args),
        Commands::Edit(args) => commands::snippet::edit(&mut store, args),
        Commands::Toggle(args) => commands::snippet::toggle(&mut store, args),
        Commands::Delete(args) => commands::snippet::delete(&mut store, args),
    }
}
