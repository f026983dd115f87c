//! Target bucket and table configuration

use std::env;

use thiserror::Error;

/// Environment variable holding the target S3 bucket name
pub const BUCKET_NAME_VAR: &str = "bucket_name";
/// Environment variable holding the target Dynamo DB table name
pub const TABLE_NAME_VAR: &str = "dynamodb";

/// Errors raised while loading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable is unset or empty
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),
}

/// Where ingested images and their metadata are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// S3 bucket receiving the image bytes
    pub bucket_name: String,
    /// Dynamo DB table receiving the image records
    pub table_name: String,
}

impl IngestConfig {
    /// Creates a configuration from explicit names
    #[must_use]
    pub fn new(bucket_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            table_name: table_name.into(),
        }
    }

    /// Reads `bucket_name` and `dynamodb` from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` if either variable is unset or empty
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bucket_name: required_var(BUCKET_NAME_VAR)?,
            table_name: required_var(TABLE_NAME_VAR)?,
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar(name))
}
