//! Ingest command - push a directory of documents into the index

use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::ingest::IngestPipeline;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Path to the documents directory
    pub path: PathBuf,

    /// Category stamped into every section's metadata
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Target search index name
    #[arg(long)]
    pub index: Option<String>,

    /// Target section size in characters (100-4000)
    #[arg(long)]
    pub max_section_length: Option<usize>,

    /// Sentence search window in characters
    #[arg(long)]
    pub sentence_search_limit: Option<usize>,

    /// Overlap between sections in characters
    #[arg(long)]
    pub section_overlap: Option<usize>,

    /// Glob patterns to include (can be specified multiple times)
    #[arg(long, short = 'i')]
    pub include: Vec<String>,

    /// Glob patterns to exclude (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Ingestion result response
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub path: String,
    pub category: String,
    pub index: String,
    pub documents_indexed: usize,
    pub documents_skipped: usize,
    pub sections_built: usize,
    pub sections_uploaded: usize,
    pub duration_secs: f64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Execute the ingest command
pub async fn execute(
    args: IngestArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate path
    let path = args.path.canonicalize().map_err(|e| {
        format!(
            "Invalid path '{}': {}. Make sure the path exists and is accessible.",
            args.path.display(),
            e
        )
    })?;

    if !path.is_dir() {
        return Err(format!(
            "Path '{}' is not a directory. Tessera ingests document directories, \
             not individual files.",
            path.display()
        )
        .into());
    }

    // Apply command-line overrides on top of the loaded config
    let mut config: Config = (*services.config).clone();
    if let Some(category) = args.category {
        config.documents.category = category;
    }
    if let Some(index) = args.index {
        config.upload.index = index;
    }
    if let Some(len) = args.max_section_length {
        config.sections.max_section_length = len;
    }
    if let Some(limit) = args.sentence_search_limit {
        config.sections.sentence_search_limit = limit;
    }
    if let Some(overlap) = args.section_overlap {
        config.sections.section_overlap = overlap;
    }
    if !args.include.is_empty() {
        config.documents.include_patterns = args.include;
    }
    if !args.exclude.is_empty() {
        config.documents.exclude_patterns = args.exclude;
    }

    // Validate section geometry
    let len = config.sections.max_section_length;
    if !(100..=4000).contains(&len) {
        return Err(format!(
            "Max section length {len} is out of range. Valid range is 100-4000 characters."
        )
        .into());
    }
    if config.sections.section_overlap >= len {
        return Err(format!(
            "Section overlap ({}) must be less than max section length ({}).",
            config.sections.section_overlap, len
        )
        .into());
    }
    config.validate()?;

    // Construct external service clients (explicit dependency
    // injection, credentials from the environment)
    let overridden = Services::new(config.clone());
    let embedder = overridden.build_embedder()?;
    let uploader = overridden.build_uploader()?;

    // Ctrl-C aborts between section emissions
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Ingesting {} as category '{}' into index '{}'...",
            colors::file_path(&path.display().to_string()),
            colors::category(&config.documents.category),
            colors::category(&config.upload.index)
        );
    }

    let pipeline = IngestPipeline::new(&config, &embedder, &uploader).with_cancellation(cancel);
    let stats = pipeline.ingest_directory(&path).await?;

    let response = IngestResponse {
        path: path.to_string_lossy().into_owned(),
        category: config.documents.category,
        index: config.upload.index,
        documents_indexed: stats.documents_indexed,
        documents_skipped: stats.documents_skipped,
        sections_built: stats.sections_built,
        sections_uploaded: stats.sections_uploaded,
        duration_secs: stats.duration_ms as f64 / 1000.0,
        completed_at: chrono::Utc::now(),
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} documents ({} sections, {} uploaded) in {}",
                colors::success("Ingested"),
                colors::number(&response.documents_indexed.to_string()),
                colors::number(&response.sections_built.to_string()),
                colors::number(&response.sections_uploaded.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if response.documents_skipped > 0 {
                println!(
                    "{} {} documents skipped (see warnings above)",
                    colors::warning("Note:"),
                    colors::number(&response.documents_skipped.to_string())
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
