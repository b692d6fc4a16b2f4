//! Error types for configuring and running the InfluxDB writer.

use core::error::Error;

use derive_more::Display;
use error_stack::Report;

/// Result type for configuration and start-up operations.
pub type ConfigResult<T> = Result<T, Report<ConfigError>>;

/// Result type for write operations.
pub type WriteResult<T> = Result<T, Report<WriteError>>;

/// Errors raised while turning raw configuration into a writer. All of them are fatal
/// at start-up.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing or a field is malformed
    #[display("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A requested result tag is not a known result attribute
    #[display("Unknown result attribute: {name}")]
    UnknownAttribute { name: String },
}

impl Error for ConfigError {}

/// Errors surfaced by the database client while writing a batch.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// The request never got an answer
    #[display("Network error: {message}")]
    Network { message: String },

    /// The database answered with a non-success status
    #[display("Write rejected: {status} - {message}")]
    Rejected { status: u16, message: String },
}

impl Error for WriteError {}
