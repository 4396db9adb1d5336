//! Tessera CLI - Command-line interface for document ingestion
//!
//! Use this for scripting, automation, or manual ingestion runs.
//!
//! # Examples
//!
//! ```bash
//! # Ingest a documents directory
//! tessera ingest ./docs --category soccer --index soccer-rules
//!
//! # Show configuration
//! tessera show-config
//! ```

use clap::Parser;
use tessera::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tessera=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
