mod config;
mod environment;
mod error;

pub use config::{ConfigError, IngestConfig};
pub use environment::Environment;
pub use error::{IngestError, IngestResult};
