//! S3-based image storage operations
mod error;

use std::sync::Arc;

use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};

pub use error::{BucketError, BucketResult};

/// Write side of the image bucket
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket objects are written to
    fn bucket_name(&self) -> &str;

    /// Writes `bytes` under `key`, replacing any existing object
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the write fails
    async fn put_object(&self, key: &str, bytes: Vec<u8>) -> BucketResult<()>;

    /// Locator for an object in this bucket, `s3://<bucket>/<key>`
    #[must_use]
    fn s3_path(&self, key: &str) -> String {
        format!("s3://{}/{key}", self.bucket_name())
    }
}

/// Image storage client for S3 operations
pub struct MediaStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl MediaStorage {
    /// Creates a new media storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for image storage
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for MediaStorage {
    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Uploads the raw image bytes
    ///
    /// No content type or metadata tags are set on the object.
    ///
    /// # Errors
    ///
    /// Returns `BucketError::S3Error` for S3 service errors
    /// Returns `BucketError::UpstreamError` for 5xx errors
    /// Returns `BucketError::AwsError` if the request could not be dispatched
    async fn put_object(&self, key: &str, bytes: Vec<u8>) -> BucketResult<()> {
        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await?;

        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
/// Test double for [`ObjectStore`]
pub mod mock {
    use std::sync::Mutex;

    use super::{BucketError, BucketResult, ObjectStore};

    /// In-memory bucket that records every write
    pub struct MockObjectStore {
        bucket_name: String,
        fail: bool,
        objects: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl MockObjectStore {
        /// Creates a bucket that accepts every write
        #[must_use]
        pub fn new(bucket_name: &str) -> Self {
            Self {
                bucket_name: bucket_name.to_string(),
                fail: false,
                objects: Mutex::default(),
            }
        }

        /// Creates a bucket that rejects every write
        #[must_use]
        pub fn failing(bucket_name: &str) -> Self {
            Self {
                fail: true,
                ..Self::new(bucket_name)
            }
        }

        /// Objects written so far as `(key, bytes)`, in order
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned
        #[must_use]
        pub fn objects(&self) -> Vec<(String, Vec<u8>)> {
            self.objects.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ObjectStore for MockObjectStore {
        fn bucket_name(&self) -> &str {
            &self.bucket_name
        }

        async fn put_object(&self, key: &str, bytes: Vec<u8>) -> BucketResult<()> {
            if self.fail {
                return Err(BucketError::S3Error("mock object store failure".to_string()));
            }
            self.objects.lock().unwrap().push((key.to_string(), bytes));
            Ok(())
        }
    }
}
