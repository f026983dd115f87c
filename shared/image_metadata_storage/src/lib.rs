//! Image metadata storage for the image ingest service
//!
//! This crate provides the DynamoDB table that records one item per ingested image.

pub mod image_record;
