//! Configuration management for the Tessera ingestion service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//!
//! API keys are never read from TOML; the embedding and upload
//! clients take them from `TESSERA_EMBEDDING_API_KEY` and
//! `TESSERA_SEARCH_API_KEY` at construction time.

use crate::core::error::{Result, TesseraError};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub sections: SectionConfig,
    #[serde(default)]
    pub documents: DocumentConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Sectionizer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionConfig {
    /// Target section size in characters (not bytes!)
    #[serde(default = "default_max_section_length")]
    pub max_section_length: usize,

    /// Max lookahead/lookback past the target size while searching
    /// for a sentence end, in characters
    #[serde(default = "default_sentence_search_limit")]
    pub sentence_search_limit: usize,

    /// Characters repeated between consecutive sections
    #[serde(default = "default_section_overlap")]
    pub section_overlap: usize,
}

/// Document discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentConfig {
    /// File patterns to include (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// Category label stamped into every section's metadata
    #[serde(default = "default_category")]
    pub category: String,
}

/// Embedding client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    /// Base URL of the OpenAI-compatible embeddings API
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Expected vector length returned by the model
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Maximum embedding attempts per section (throttling retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_sec: u64,
}

/// Search index upload configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Search service endpoint
    #[serde(default)]
    pub endpoint: String,

    /// Target index name
    #[serde(default)]
    pub index: String,

    /// REST API version sent with upload requests
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Sections per upload batch (1-1000)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_sec: u64,
}

// Default value functions
fn default_max_section_length() -> usize {
    1000
}

fn default_sentence_search_limit() -> usize {
    100
}

fn default_section_overlap() -> usize {
    100
}

fn default_include_patterns() -> Vec<String> {
    vec!["*.pdf".to_string(), "*.json".to_string()]
}

fn default_max_file_size() -> usize {
    50
}

fn default_category() -> String {
    "general".to_string()
}

fn default_embedding_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_dimensions() -> usize {
    1536
}

fn default_max_attempts() -> usize {
    15
}

fn default_api_version() -> String {
    "2023-11-01".to_string()
}

fn default_batch_size() -> usize {
    1000
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            max_section_length: default_max_section_length(),
            sentence_search_limit: default_sentence_search_limit(),
            section_overlap: default_section_overlap(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            include_patterns: default_include_patterns(),
            exclude_patterns: Vec::new(),
            max_file_size_mb: default_max_file_size(),
            category: default_category(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_embedding_endpoint(),
            model: default_embedding_model(),
            dimensions: default_dimensions(),
            max_attempts: default_max_attempts(),
            timeout_sec: default_request_timeout(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            index: String::new(),
            api_version: default_api_version(),
            batch_size: default_batch_size(),
            timeout_sec: default_request_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TesseraError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Create default configuration
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. TESSERA_CONFIG env var
    /// 2. XDG config file (~/.config/tessera/config.toml)
    /// 3. Legacy ./tessera.toml (for backward compatibility)
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("TESSERA_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("tessera.toml").exists() {
                // Fall back to legacy location for backward compatibility
                Self::from_file("tessera.toml")?
            } else {
                Self::default()
            }
        };

        // Override with environment variables
        config.merge_env();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Sectionizer configuration
        if let Ok(max_len) = env::var("TESSERA_MAX_SECTION_LENGTH") {
            if let Ok(len) = max_len.parse() {
                self.sections.max_section_length = len;
            }
        }
        if let Ok(limit) = env::var("TESSERA_SENTENCE_SEARCH_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.sections.sentence_search_limit = l;
            }
        }
        if let Ok(overlap) = env::var("TESSERA_SECTION_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.sections.section_overlap = o;
            }
        }

        // Document configuration
        if let Ok(max_size) = env::var("TESSERA_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.documents.max_file_size_mb = size;
            }
        }
        if let Ok(category) = env::var("TESSERA_CATEGORY") {
            self.documents.category = category;
        }

        // Embedding configuration
        if let Ok(endpoint) = env::var("TESSERA_EMBEDDING_ENDPOINT") {
            self.embedding.endpoint = endpoint;
        }
        if let Ok(model) = env::var("TESSERA_EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Ok(dims) = env::var("TESSERA_EMBEDDING_DIMENSIONS") {
            if let Ok(d) = dims.parse() {
                self.embedding.dimensions = d;
            }
        }
        if let Ok(attempts) = env::var("TESSERA_EMBEDDING_MAX_ATTEMPTS") {
            if let Ok(a) = attempts.parse() {
                self.embedding.max_attempts = a;
            }
        }

        // Upload configuration
        if let Ok(endpoint) = env::var("TESSERA_SEARCH_ENDPOINT") {
            self.upload.endpoint = endpoint;
        }
        if let Ok(index) = env::var("TESSERA_SEARCH_INDEX") {
            self.upload.index = index;
        }
        if let Ok(batch) = env::var("TESSERA_BATCH_SIZE") {
            if let Ok(b) = batch.parse() {
                self.upload.batch_size = b;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate sectionizer config
        if self.sections.max_section_length == 0 {
            return Err(TesseraError::ConfigError(
                "Max section length must be non-zero".to_string(),
            ));
        }

        if self.sections.section_overlap >= self.sections.max_section_length {
            return Err(TesseraError::ConfigError(
                "Section overlap must be less than max section length".to_string(),
            ));
        }

        // Validate embedding config
        if self.embedding.dimensions == 0 {
            return Err(TesseraError::ConfigError(
                "Embedding dimensions must be non-zero".to_string(),
            ));
        }

        if self.embedding.max_attempts == 0 {
            return Err(TesseraError::ConfigError(
                "Embedding max attempts must be non-zero".to_string(),
            ));
        }

        // Validate upload config
        if self.upload.batch_size == 0 || self.upload.batch_size > 1000 {
            return Err(TesseraError::ConfigError(
                "Upload batch size must be between 1 and 1000".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Max section length: {} chars",
            self.sections.max_section_length
        );
        tracing::info!(
            "  Sentence search limit: {} chars",
            self.sections.sentence_search_limit
        );
        tracing::info!("  Section overlap: {} chars", self.sections.section_overlap);
        tracing::info!(
            "  Include patterns: {} patterns",
            self.documents.include_patterns.len()
        );
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.documents.exclude_patterns.len()
        );
        tracing::info!("  Max file size: {} MB", self.documents.max_file_size_mb);
        tracing::info!("  Category: {}", self.documents.category);
        tracing::info!("  Embedding endpoint: {}", self.embedding.endpoint);
        tracing::info!("  Embedding model: {}", self.embedding.model);
        tracing::info!("  Embedding dimensions: {}", self.embedding.dimensions);
        tracing::info!("  Embedding max attempts: {}", self.embedding.max_attempts);
        tracing::info!("  Search endpoint: {}", self.upload.endpoint);
        tracing::info!("  Search index: {}", self.upload.index);
        tracing::info!("  Upload batch size: {}", self.upload.batch_size);
    }
}
