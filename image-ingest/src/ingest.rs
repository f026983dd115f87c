//! Image ingestion pipeline
//!
//! Fetch, store the bytes, record the metadata. Each step runs after the
//! previous one completes and nothing is retried or rolled back.

use std::sync::Arc;

use chrono::{DateTime, Local};
use image_metadata_storage::image_record::{ImageRecord, MetadataStore};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    fetcher::ImageFetcher,
    filename::derive_filename,
    media_storage::ObjectStore,
    types::IngestResult,
};

/// `strftime` layout of the record timestamp
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// JSON encoding of the string `image added`
pub const IMAGE_ADDED_BODY: &str = "\"image added\"";

/// Decoded invocation body
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    /// Location of the image to ingest
    pub url: String,
}

/// Invocation result handed back to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    /// HTTP status code
    pub status_code: u16,
    /// JSON encoded response body
    pub body: String,
}

impl IngestResponse {
    /// Response returned once both writes completed
    #[must_use]
    pub fn image_added() -> Self {
        Self {
            status_code: 200,
            body: IMAGE_ADDED_BODY.to_string(),
        }
    }
}

/// Formats a creation time the way image records store it
#[must_use]
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Downloads images and writes them with their metadata
pub struct ImageIngestor {
    fetcher: Arc<dyn ImageFetcher>,
    object_store: Arc<dyn ObjectStore>,
    metadata_store: Arc<dyn MetadataStore>,
}

impl ImageIngestor {
    /// Creates a new ingestor
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Downloads the source image
    /// * `object_store` - Bucket the image bytes are written to
    /// * `metadata_store` - Table the image record is written to
    #[must_use]
    pub const fn new(
        fetcher: Arc<dyn ImageFetcher>,
        object_store: Arc<dyn ObjectStore>,
        metadata_store: Arc<dyn MetadataStore>,
    ) -> Self {
        Self {
            fetcher,
            object_store,
            metadata_store,
        }
    }

    /// Ingests the image referenced by a `{"url": ...}` request body
    ///
    /// # Errors
    ///
    /// - `IngestError::InvalidRequest` - body is not JSON or lacks `url`
    /// - `IngestError::Fetch` - the image could not be downloaded
    /// - `IngestError::ObjectStore` - the bucket write failed, nothing was stored
    /// - `IngestError::MetadataStore` - the table write failed, the object is left without a record
    #[instrument(skip(self, request_body))]
    pub async fn ingest(&self, request_body: &str) -> IngestResult<IngestResponse> {
        let IngestRequest { url } = serde_json::from_str(request_body)?;
        let timestamp = format_timestamp(&Local::now());

        let bytes = self.fetcher.fetch(&url).await?;

        let name = derive_filename(&url);
        if name.is_empty() {
            tracing::warn!(%url, "no filename derivable from url, writing to empty key");
        }

        self.object_store.put_object(&name, bytes).await?;

        let path = self.object_store.s3_path(&name);
        tracing::info!(%url, key = %name, %path, "image stored");

        let record = ImageRecord {
            name,
            original_link: url,
            path,
            timestamp,
        };
        self.metadata_store.insert(&record).await?;

        Ok(IngestResponse::image_added())
    }
}
