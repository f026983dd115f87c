//! HTTP download of source images
mod error;

use reqwest::Client;

pub use error::{FetchError, FetchResult};

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Downloads the raw bytes behind a URL
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Issues a GET to `url` and returns the response payload
    ///
    /// The payload is returned whatever the status code or content type.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Request` if the request or the body read fails
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>>;
}

/// `reqwest` backed image fetcher
pub struct HttpImageFetcher {
    http_client: Client,
}

impl HttpImageFetcher {
    /// Creates a new fetcher
    ///
    /// No request timeout is set, a slow source is waited on until it completes.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ClientBuild` if the HTTP client fails to be created
    pub fn new() -> FetchResult<Self> {
        let http_client = Client::builder()
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self { http_client })
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        let to_fetch_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(to_fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            // Payload is kept regardless of status
            tracing::warn!(%url, %status, "image source responded with non-success status");
        }

        let bytes = response.bytes().await.map_err(to_fetch_error)?;
        tracing::debug!(%url, len = bytes.len(), "fetched image");

        Ok(bytes.to_vec())
    }
}

#[cfg(any(test, feature = "test-utils"))]
/// Test double for [`ImageFetcher`]
pub mod mock {
    use std::sync::Mutex;

    use super::{FetchResult, ImageFetcher};

    /// Fetcher that returns the same payload for every URL
    pub struct MockImageFetcher {
        payload: Vec<u8>,
        requested: Mutex<Vec<String>>,
    }

    impl MockImageFetcher {
        /// Creates a fetcher that answers every request with `payload`
        #[must_use]
        pub const fn new(payload: Vec<u8>) -> Self {
            Self {
                payload,
                requested: Mutex::new(Vec::new()),
            }
        }

        /// URLs requested so far, in order
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned
        #[must_use]
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ImageFetcher for MockImageFetcher {
        async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.payload.clone())
        }
    }
}
