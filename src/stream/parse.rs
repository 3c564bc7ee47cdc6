//! Parse stage: map raw lines to records and drop the ones that did not parse
use std::collections::{BTreeMap, HashMap};

use super::core::{delegate_stream, Filter, Stream, Transform};

/// A parsed log line: field name to value.
pub type Record = BTreeMap<String, String>;

/// Marks the parser result that means "could not parse this line".
///
/// Parsers report failure by returning an empty value rather than an error,
/// and the `Parse` stage drops such results from the stream.
pub trait Unparsed {
    fn is_unparsed(&self) -> bool;
}

impl<K, V> Unparsed for BTreeMap<K, V> {
    fn is_unparsed(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, H> Unparsed for HashMap<K, V, H> {
    fn is_unparsed(&self) -> bool {
        self.is_empty()
    }
}

impl Unparsed for String {
    fn is_unparsed(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Unparsed for Vec<T> {
    fn is_unparsed(&self) -> bool {
        self.is_empty()
    }
}

/// Transform by a parser, then filter out unparsed results.
pub struct Parse<T> {
    inner: Filter<T>,
}

impl<R: Unparsed + 'static> Parse<R> {
    pub fn new<S, F>(parser: F, source: S) -> Self
    where
        S: Stream + 'static,
        F: FnMut(S::Item) -> R + 'static,
    {
        let parsed = Transform::new(parser, source);
        Parse {
            inner: Filter::new(|record: &R| !record.is_unparsed(), parsed),
        }
    }
}

delegate_stream!(Parse);
