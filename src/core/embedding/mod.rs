//! Embedding client.
//!
//! `Embedder` is the opaque contract the section builder depends
//! on: text in, fixed-length vector out. The one concrete
//! implementation talks to OpenAI-compatible `/embeddings`
//! endpoints. Throttling (HTTP 429) and server errors surface as
//! `EmbeddingThrottled` so the builder's backoff loop can retry
//! them; everything else is terminal.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TesseraError};

/// Text-to-vector embedding contract
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one section text into a fixed-length vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Vector length this embedder produces
    fn dimensions(&self) -> usize;
}

/// Embeddings client for OpenAI-compatible endpoints.
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Build a new embeddings client.
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        dimensions: usize,
        timeout: Duration,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(TesseraError::ConfigError(
                "Missing embedding API key".to_string(),
            ));
        }
        if model.trim().is_empty() {
            return Err(TesseraError::ConfigError(
                "Missing embedding model name".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|_| TesseraError::ConfigError("Invalid embedding API key".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            model: model.to_string(),
            dimensions,
        })
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    TesseraError::EmbeddingThrottled(e.to_string())
                } else {
                    TesseraError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                return Err(TesseraError::EmbeddingThrottled(format!("{status}: {body}")));
            }
            return Err(TesseraError::EmbeddingFailed(format!("{status}: {body}")));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            TesseraError::EmbeddingFailed(format!("Failed to parse embedding response: {e}"))
        })?;

        let mut data = parsed.data;
        if data.len() != 1 {
            return Err(TesseraError::EmbeddingFailed(format!(
                "Expected 1 embedding, got {}",
                data.len()
            )));
        }

        let vector = data.remove(0).embedding;
        if vector.len() != self.dimensions {
            return Err(TesseraError::EmbeddingFailed(format!(
                "Expected {} dimensions, got {}",
                self.dimensions,
                vector.len()
            )));
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}
