//! Lazy pull streams and their decorators
//!
//! Every stream holds one element of lookahead: `head` peeks, `get` consumes.
//! Decorators take ownership of the stream they wrap and expose the same
//! contract, so pipelines are built bottom-up from a source.

pub mod core;
pub mod constructors;
pub mod parse;
pub mod merge;
pub mod rewindable;
pub mod correlation;

// Re-export core types
pub use self::core::{
    BoxStream, Filter, Generator, LazyStream, Results, Stream, StreamExt, Transform,
};

// Re-export constructors
pub use constructors::{empty, from_generator, from_iter, once, repeat_with, unfold};

pub use parse::{Parse, Record, Unparsed};

pub use merge::{Merge, RewindableMerge};

pub use rewindable::{IntoRewindable, Rewindable, RewindableStream};

pub use correlation::{correlate, Correlation, CorrelationStats};
