//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show all configuration including defaults
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub sections: SectionsConfig,
    pub documents: DocumentsConfig,
    pub embedding: EmbeddingConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Serialize)]
pub struct SectionsConfig {
    pub max_section_length: usize,
    pub sentence_search_limit: usize,
    pub section_overlap: usize,
}

#[derive(Debug, Serialize)]
pub struct DocumentsConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub max_file_size_mb: usize,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingConfig {
    pub endpoint: String,
    pub model: String,
    pub dimensions: usize,
    pub max_attempts: usize,
}

#[derive(Debug, Serialize)]
pub struct UploadConfig {
    pub endpoint: String,
    pub index: String,
    pub batch_size: usize,
}

/// Execute the config command
pub async fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;

    let xdg = crate::core::xdg::XdgDirs::new();
    let config_file = xdg.config_file().to_string_lossy().into_owned();

    let response = ConfigResponse {
        config_file,
        sections: SectionsConfig {
            max_section_length: config.sections.max_section_length,
            sentence_search_limit: config.sections.sentence_search_limit,
            section_overlap: config.sections.section_overlap,
        },
        documents: DocumentsConfig {
            include_patterns: config.documents.include_patterns.clone(),
            exclude_patterns: config.documents.exclude_patterns.clone(),
            max_file_size_mb: config.documents.max_file_size_mb,
            category: config.documents.category.clone(),
        },
        embedding: EmbeddingConfig {
            endpoint: config.embedding.endpoint.clone(),
            model: config.embedding.model.clone(),
            dimensions: config.embedding.dimensions,
            max_attempts: config.embedding.max_attempts,
        },
        upload: UploadConfig {
            endpoint: config.upload.endpoint.clone(),
            index: config.upload.index.clone(),
            batch_size: config.upload.batch_size,
        },
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  sections:");
            println!(
                "    max_section_length: {}",
                response.sections.max_section_length
            );
            println!(
                "    sentence_search_limit: {}",
                response.sections.sentence_search_limit
            );
            println!("    section_overlap: {}", response.sections.section_overlap);
            println!("  documents:");
            println!(
                "    include_patterns: {:?}",
                response.documents.include_patterns
            );
            println!(
                "    exclude_patterns: {:?}",
                response.documents.exclude_patterns
            );
            println!(
                "    max_file_size_mb: {}",
                response.documents.max_file_size_mb
            );
            println!("    category: {}", response.documents.category);
            println!("  embedding:");
            println!("    endpoint: {}", response.embedding.endpoint);
            println!("    model: {}", response.embedding.model);
            println!("    dimensions: {}", response.embedding.dimensions);
            println!("    max_attempts: {}", response.embedding.max_attempts);
            println!("  upload:");
            println!("    endpoint: {}", response.upload.endpoint);
            println!("    index: {}", response.upload.index);
            println!("    batch_size: {}", response.upload.batch_size);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
