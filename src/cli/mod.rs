//! CLI adapter for Tessera
//!
//! Provides the command-line interface for document ingestion.
//! This module depends on `core/` only.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Tessera - PDF Ingestion Pipeline
///
/// Extracts page text from PDF documents, splits it into overlapping
/// sentence-aware sections, embeds each section and uploads the result
/// to a remote vector search index.
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author = "RHOBIMD HEALTH")]
#[command(version)]
#[command(about = "PDF ingestion pipeline for retrieval", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output for scripting
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest documents into the search index
    Ingest(commands::IngestArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Show version and service information
    Info(commands::InfoArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  tessera completions bash > ~/.local/share/bash-completion/completions/tessera
    ///   zsh:   tessera completions zsh > ~/.zfunc/_tessera
    ///   fish:  tessera completions fish > ~/.config/fish/completions/tessera.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::{migrate_legacy_paths, XdgDirs};
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;

    // Run migration from legacy paths (if needed)
    if let Err(e) = migrate_legacy_paths(&xdg) {
        output::print_warning(&format!("Migration issue: {e}"));
    }

    // Load configuration
    let config = Config::load()?;

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Info(args) => commands::info::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
