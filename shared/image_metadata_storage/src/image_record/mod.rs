//! Image record storage integration using Dynamo DB
//!
//! One item is written per ingested image, keyed by the derived filename.

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoDbClient};
use serde::{Deserialize, Serialize};
use strum::Display;

pub use error::{ImageMetadataStorageError, ImageMetadataStorageResult};

/// Attribute names for image record table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "PascalCase")]
pub enum ImageRecordAttribute {
    /// Derived filename (Primary Key)
    ///
    /// Same value as the S3 object key
    Name,
    /// URL the image bytes were fetched from
    OriginalLink,
    /// `s3://<bucket>/<name>` locator
    Path,
    /// Creation time, `MM/DD/YYYY, HH:MM:SS` in process local time
    Timestamp,
}

/// Image record data structure
///
/// Every attribute is stored as a DynamoDB string (`S`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageRecord {
    /// Derived filename (Primary Key)
    pub name: String,
    /// URL the image bytes were fetched from
    pub original_link: String,
    /// `s3://<bucket>/<name>` locator
    pub path: String,
    /// Creation time
    pub timestamp: String,
}

/// Write side of the image metadata table
#[async_trait::async_trait]
pub trait MetadataStore: Send + Sync {
    /// Writes one image record, replacing any item with the same name
    async fn insert(&self, record: &ImageRecord) -> ImageMetadataStorageResult<()>;
}

/// Image metadata storage client for Dynamo DB operations
pub struct ImageMetadataStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl ImageMetadataStorage {
    /// Creates a new image metadata storage client
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured Dynamo DB client
    /// * `table_name` - Dynamo DB table name for image records
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Gets an image record by name
    ///
    /// # Errors
    ///
    /// Returns `ImageMetadataStorageError` if the Dynamo DB operation fails
    pub async fn get_by_name(
        &self,
        name: &str,
    ) -> ImageMetadataStorageResult<Option<ImageRecord>> {
        let response = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(
                ImageRecordAttribute::Name.to_string(),
                AttributeValue::S(name.to_string()),
            )
            .send()
            .await?;

        let item = response
            .item()
            .map(|item| serde_dynamo::from_item(item.clone()))
            .transpose()
            .map_err(|e| ImageMetadataStorageError::SerializationError(e.to_string()))?;

        Ok(item)
    }
}

#[async_trait::async_trait]
impl MetadataStore for ImageMetadataStorage {
    /// Inserts an image record
    ///
    /// No condition expression is set, a record with the same name is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `ImageMetadataStorageError` if the Dynamo DB operation fails
    async fn insert(&self, record: &ImageRecord) -> ImageMetadataStorageResult<()> {
        let item = serde_dynamo::to_item(record)
            .map_err(|e| ImageMetadataStorageError::SerializationError(e.to_string()))?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        tracing::debug!(table = %self.table_name, name = %record.name, "image record written");

        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
/// Test double for [`MetadataStore`]
pub mod mock {
    use std::sync::Mutex;

    use aws_sdk_dynamodb::{error::SdkError, operation::put_item::PutItemError};

    use super::{ImageMetadataStorageResult, ImageRecord, MetadataStore};

    /// In-memory metadata store that records every insert
    #[derive(Default)]
    pub struct MockMetadataStore {
        fail: bool,
        records: Mutex<Vec<ImageRecord>>,
    }

    impl MockMetadataStore {
        /// Creates a store that accepts every insert
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a store that rejects every insert
        #[must_use]
        pub fn failing() -> Self {
            Self {
                fail: true,
                records: Mutex::default(),
            }
        }

        /// Records inserted so far, in order
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned
        #[must_use]
        pub fn records(&self) -> Vec<ImageRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl MetadataStore for MockMetadataStore {
        async fn insert(&self, record: &ImageRecord) -> ImageMetadataStorageResult<()> {
            if self.fail {
                let err: SdkError<PutItemError> =
                    SdkError::construction_failure("mock metadata store failure");
                return Err(err.into());
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }
}
