//! Core trait for stream connectors

use crate::error::StreamResult;
use crate::stream::LazyStream;

/// Main trait for stream connectors
///
/// A connector turns its configuration into a source stream. Opening the
/// stream validates the configuration only; I/O against the underlying
/// resource happens while the stream is consumed, so failures surface at the
/// `head`/`get` call that first needs the resource.
pub trait StreamConnector<T> {
    /// Configuration type for this connector
    type Config;

    /// Create a source stream from the connector
    fn from_source(&self, config: Self::Config) -> StreamResult<LazyStream<T>>;

    /// Get connector name
    fn name(&self) -> &'static str;
}
