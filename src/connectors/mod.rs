//! Stream connectors for reading log data from external sources

pub mod stream_connector;
pub mod file_connector;

// Re-export main types
pub use stream_connector::StreamConnector;

// Re-export connector implementations
pub use file_connector::{file_lines, open_lines, FileConnector};
