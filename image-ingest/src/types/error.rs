//! Errors raised by the ingestion pipeline

use image_metadata_storage::image_record::ImageMetadataStorageError;
use thiserror::Error;

use crate::{fetcher::FetchError, media_storage::BucketError};

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

/// Failure of one ingestion step
///
/// Nothing is rolled back. An `ObjectStore` failure means nothing was written,
/// a `MetadataStore` failure leaves the object in the bucket without a record.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Request body is not JSON or has no string `url` field
    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    /// Source image could not be downloaded
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Image bytes could not be written to the bucket
    #[error("Failed to store image: {0}")]
    ObjectStore(#[from] BucketError),

    /// Image record could not be written to the table
    #[error("Failed to store image metadata: {0}")]
    MetadataStore(#[source] Box<ImageMetadataStorageError>),
}

impl From<ImageMetadataStorageError> for IngestError {
    fn from(error: ImageMetadataStorageError) -> Self {
        Self::MetadataStore(Box::new(error))
    }
}

impl IngestError {
    /// Short label of the step that failed, used in logs
    #[must_use]
    pub const fn step(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "parse",
            Self::Fetch(_) => "fetch",
            Self::ObjectStore(_) => "object_store",
            Self::MetadataStore(_) => "metadata_store",
        }
    }
}
