//! Search index upload client.
//!
//! `IndexUploader` is the contract the pipeline pushes batches
//! through. The concrete client posts document batches to a remote
//! search service's REST endpoint and reports per-batch success
//! counts. No retry happens at this layer; a failed batch is the
//! caller's to log and move past.
//!
//! Section metadata travels typed through the pipeline and is
//! serialized to a JSON string only here, at the wire boundary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TesseraError};
use crate::core::types::{BatchReport, IndexedSection};

/// Batch upload contract for the remote search index
#[async_trait]
pub trait IndexUploader: Send + Sync {
    /// Upload one batch of sections; returns submitted/succeeded
    /// counts
    async fn upload_batch(&self, sections: &[IndexedSection]) -> Result<BatchReport>;
}

/// REST client for the remote search index's document batch API.
pub struct SearchIndexClient {
    client: reqwest::Client,
    upload_url: String,
}

impl SearchIndexClient {
    /// Build a new search index client.
    pub fn new(
        api_key: &str,
        endpoint: &str,
        index: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(TesseraError::ConfigError(
                "Missing search API key".to_string(),
            ));
        }
        if endpoint.trim().is_empty() {
            return Err(TesseraError::ConfigError(
                "Missing search endpoint".to_string(),
            ));
        }
        if index.trim().is_empty() {
            return Err(TesseraError::ConfigError(
                "Missing search index name".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "api-key",
            HeaderValue::from_str(api_key.trim())
                .map_err(|_| TesseraError::ConfigError("Invalid search API key".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let upload_url = format!(
            "{}/indexes/{}/docs/index?api-version={}",
            endpoint.trim_end_matches('/'),
            index,
            api_version
        );

        Ok(Self { client, upload_url })
    }
}

#[async_trait]
impl IndexUploader for SearchIndexClient {
    async fn upload_batch(&self, sections: &[IndexedSection]) -> Result<BatchReport> {
        if sections.is_empty() {
            return Ok(BatchReport {
                uploaded: 0,
                succeeded: 0,
            });
        }

        let documents = sections
            .iter()
            .map(wire_document)
            .collect::<Result<Vec<_>>>()?;
        let batch = UploadBatch { value: documents };

        let response = self
            .client
            .post(&self.upload_url)
            .json(&batch)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(TesseraError::UploadFailed(format!("{status}: {body}")));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| TesseraError::UploadFailed(format!("Failed to parse response: {e}")))?;

        let succeeded = parsed.value.iter().filter(|r| r.status).count();

        Ok(BatchReport {
            uploaded: sections.len(),
            succeeded,
        })
    }
}

/// Serialize one section into its wire form, stringifying the typed
/// metadata.
fn wire_document(section: &IndexedSection) -> Result<WireDocument<'_>> {
    Ok(WireDocument {
        action: "upload",
        id: &section.id,
        content: &section.content,
        metadata: serde_json::to_string(&section.metadata)?,
        content_vector: &section.content_vector,
    })
}

#[derive(Serialize)]
struct UploadBatch<'a> {
    value: Vec<WireDocument<'a>>,
}

#[derive(Serialize)]
struct WireDocument<'a> {
    #[serde(rename = "@search.action")]
    action: &'static str,
    id: &'a str,
    content: &'a str,
    metadata: String,
    content_vector: &'a [f32],
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    value: Vec<UploadResult>,
}

#[derive(Debug, Deserialize)]
struct UploadResult {
    #[serde(default)]
    status: bool,
}
