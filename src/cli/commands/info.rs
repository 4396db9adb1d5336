//! Info command - show version and service information

use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Show detailed information
    #[arg(long, short = 'd')]
    pub detailed: bool,
}

/// Service information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub config_file: String,
    pub embedding_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_index: Option<String>,
}

/// Execute the info command
pub async fn execute(
    args: InfoArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let xdg = crate::core::xdg::XdgDirs::new();
    let config_file = xdg.config_file().to_string_lossy().into_owned();

    let search_index = if args.detailed {
        Some(services.config.upload.index.clone())
    } else {
        None
    };

    let info = InfoResponse {
        name: "tessera".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        config_file,
        embedding_model: services.config.embedding.model.clone(),
        search_index,
    };

    match format {
        OutputFormat::Human => {
            println!("tessera {}", info.version);
            println!("Config: {}", info.config_file);
            println!("Embedding model: {}", info.embedding_model);
            if let Some(index) = info.search_index {
                println!("Search index: {index}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
