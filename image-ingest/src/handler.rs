//! Lambda invocation glue around [`ImageIngestor`]

use lambda_runtime::{Error, LambdaEvent};
use serde::Deserialize;

use crate::ingest::{ImageIngestor, IngestResponse};

/// Invocation envelope
///
/// Only `body` is read, so direct invokes (`{"body": "..."}`) and API
/// Gateway proxy events are both accepted. Every other field is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvocationEvent {
    /// JSON encoded `{"url": ...}` request, absent or `null` when no body was sent
    #[serde(default)]
    pub body: Option<String>,
}

/// Runs one invocation
///
/// A missing body is handed to the ingestor as an empty string and fails to
/// parse like any other malformed one. A failed step is logged and returned
/// as an error so the platform reports a failed invocation.
///
/// # Errors
///
/// Returns the `IngestError` of the failing step, boxed
pub async fn handle_event(
    ingestor: &ImageIngestor,
    event: LambdaEvent<InvocationEvent>,
) -> Result<IngestResponse, Error> {
    let request_body = event.payload.body.unwrap_or_default();

    ingestor.ingest(&request_body).await.map_err(|err| {
        tracing::error!(
            request_id = %event.context.request_id,
            step = err.step(),
            error = %err,
            "image ingestion failed"
        );
        err.into()
    })
}
