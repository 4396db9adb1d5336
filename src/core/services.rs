//! Unified service container for Tessera
//!
//! Holds the loaded configuration and constructs the external
//! service clients explicitly — no module-level singletons. Clients
//! are built per command since credentials come from the
//! environment at invocation time.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::core::config::Config;
use crate::core::embedding::OpenAiEmbedder;
use crate::core::error::{Result, TesseraError};
use crate::core::index::SearchIndexClient;

/// Environment variable holding the embedding API key
pub const EMBEDDING_API_KEY_VAR: &str = "TESSERA_EMBEDDING_API_KEY";

/// Environment variable holding the search service API key
pub const SEARCH_API_KEY_VAR: &str = "TESSERA_SEARCH_API_KEY";

/// Unified services container
///
/// All adapters use this same struct for configuration access and
/// client construction.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Construct the embeddings client from config + environment.
    pub fn build_embedder(&self) -> Result<OpenAiEmbedder> {
        let api_key = env::var(EMBEDDING_API_KEY_VAR).map_err(|_| {
            TesseraError::ConfigError(format!("{EMBEDDING_API_KEY_VAR} is not set"))
        })?;

        OpenAiEmbedder::new(
            &api_key,
            &self.config.embedding.endpoint,
            &self.config.embedding.model,
            self.config.embedding.dimensions,
            Duration::from_secs(self.config.embedding.timeout_sec),
        )
    }

    /// Construct the search index upload client from config +
    /// environment.
    pub fn build_uploader(&self) -> Result<SearchIndexClient> {
        let api_key = env::var(SEARCH_API_KEY_VAR)
            .map_err(|_| TesseraError::ConfigError(format!("{SEARCH_API_KEY_VAR} is not set")))?;

        SearchIndexClient::new(
            &api_key,
            &self.config.upload.endpoint,
            &self.config.upload.index,
            &self.config.upload.api_version,
            Duration::from_secs(self.config.upload.timeout_sec),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.upload.endpoint = "https://search.example.net".to_string();
        config.upload.index = "sections".to_string();
        config
    }

    #[test]
    fn test_services_clone_shares_config() {
        let services = Services::new(test_config());
        let cloned = services.clone();

        assert!(Arc::ptr_eq(&services.config, &cloned.config));
    }

    #[test]
    #[serial]
    fn test_build_embedder_requires_api_key() {
        env::remove_var(EMBEDDING_API_KEY_VAR);

        let services = Services::new(test_config());
        let result = services.build_embedder();

        assert!(matches!(result, Err(TesseraError::ConfigError(_))));
    }

    #[test]
    #[serial]
    fn test_build_embedder_with_api_key() {
        env::set_var(EMBEDDING_API_KEY_VAR, "sk-test");

        let services = Services::new(test_config());
        assert!(services.build_embedder().is_ok());

        env::remove_var(EMBEDDING_API_KEY_VAR);
    }

    #[test]
    #[serial]
    fn test_build_uploader_requires_api_key() {
        env::remove_var(SEARCH_API_KEY_VAR);

        let services = Services::new(test_config());
        let result = services.build_uploader();

        assert!(matches!(result, Err(TesseraError::ConfigError(_))));
    }

    #[test]
    #[serial]
    fn test_build_uploader_with_api_key() {
        env::set_var(SEARCH_API_KEY_VAR, "search-key");

        let services = Services::new(test_config());
        assert!(services.build_uploader().is_ok());

        env::remove_var(SEARCH_API_KEY_VAR);
    }
}
