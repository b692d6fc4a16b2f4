//! Database client seam.
//!
//! Writers only see [`InfluxClient`]; the connection itself is owned by whoever builds
//! the writer. [`HttpClient`] is the binding used when the writer is created from
//! configuration.

pub mod http;

use crate::config::WriteConsistency;
use crate::encoders::Point;
use crate::error::WriteResult;

pub use http::HttpClient;

/// Per-batch write parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteRequest<'a> {
    pub database: &'a str,
    pub retention_policy: &'a str,
    pub consistency: WriteConsistency,
}

/// A handle to a time-series database that accepts batches of points.
///
/// Implementations must be safe to call from several dispatch threads at once.
pub trait InfluxClient: Send + Sync {
    /// Write all `points` in one request. Retries are left to the caller.
    fn write(&self, request: &WriteRequest<'_>, points: &[Point]) -> WriteResult<()>;
}
