//! Image ingest Lambda
//!
//! Downloads an image from a URL, writes it to S3 and records it in Dynamo DB.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Source image download
pub mod fetcher;

/// Object key derivation
pub mod filename;

/// Lambda invocation handler
pub mod handler;

/// Ingestion pipeline
pub mod ingest;

/// S3 image storage
pub mod media_storage;

/// Configuration and error types
pub mod types;
