//! logstream - lazy, composable pull streams for log processing
//!
//! Read lines from one or more files, filter, parse, merge several logs and
//! look back over recently seen elements without loading whole inputs into
//! memory and without reading anything twice.
//!
//! ```no_run
//! use logstream::connectors::file_lines;
//! use logstream::stream::{Merge, Stream, StreamExt};
//!
//! # fn main() -> logstream::error::StreamResult<()> {
//! let access = file_lines(["access.log", "access.log.1.gz"])?;
//! let errors = file_lines(["error.log"])?;
//! let mut merged = Merge::round_robin(vec![access, errors])?
//!     .filter(|line: &String| line.contains("/login"));
//! while let Some(line) = merged.get()? {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

pub mod connectors;
pub mod error;
pub mod pipe;
pub mod stream;
pub mod stream_configuration;

// Re-export the stream protocol and decorators at the crate root
pub use error::{StreamError, StreamResult};
pub use stream::{
    correlate, empty, from_generator, from_iter, once, repeat_with, unfold, BoxStream,
    Correlation, CorrelationStats, Filter, IntoRewindable, LazyStream, Merge, Parse, Record,
    Rewindable, RewindableMerge, RewindableStream, Stream, StreamExt, Transform, Unparsed,
};
