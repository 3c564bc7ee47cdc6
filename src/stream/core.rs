//! Core pull-stream protocol: the `Stream` trait, the generator-backed
//! `LazyStream`, and the `Filter` / `Transform` decorators.

use std::fmt;

use super::merge::Merge;
use super::parse::{Parse, Unparsed};
use super::rewindable::Rewindable;
use crate::error::{StreamError, StreamResult};

/// A nullary generator producing the next element, `None` at the end.
pub type Generator<T> = Box<dyn FnMut() -> StreamResult<Option<T>>>;

/// A heap-allocated stream, for pipelines mixing decorator types.
pub type BoxStream<T> = Box<dyn Stream<Item = T>>;

/// Pull stream with one element of lookahead.
///
/// `head` peeks at the next element without side effects; `get` consumes it
/// and advances. Once either reports `None`, every later call does too.
pub trait Stream {
    type Item;

    /// The next element, not yet consumed.
    fn head(&self) -> StreamResult<Option<&Self::Item>>;

    /// Consume the next element and advance.
    fn get(&mut self) -> StreamResult<Option<Self::Item>>;

    /// True once the stream has nothing more to give.
    fn is_exhausted(&self) -> bool {
        matches!(self.head(), Ok(None))
    }
}

impl<S: Stream + ?Sized> Stream for Box<S> {
    type Item = S::Item;

    fn head(&self) -> StreamResult<Option<&Self::Item>> {
        (**self).head()
    }

    fn get(&mut self) -> StreamResult<Option<Self::Item>> {
        (**self).get()
    }

    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
}

#[derive(Debug)]
enum Head<T> {
    Value(T),
    Failed(StreamError),
    End,
}

/// The base stream: a head slot primed from a generator.
///
/// The generator is called once on construction and once per `get`. It is
/// dropped the first time it returns `None` or an error and never called
/// again. An error is parked in the head slot: `head` reports it as often as
/// asked, the next `get` reports it once and leaves the stream exhausted.
pub struct LazyStream<T> {
    head: Head<T>,
    generator: Option<Generator<T>>,
}

impl<T: 'static> LazyStream<T> {
    pub fn new<G>(generator: G) -> Self
    where
        G: FnMut() -> StreamResult<Option<T>> + 'static,
    {
        let mut stream = LazyStream {
            head: Head::End,
            generator: Some(Box::new(generator)),
        };
        stream.advance();
        stream
    }
}

impl<T> LazyStream<T> {
    fn advance(&mut self) {
        let next = match self.generator.as_mut() {
            Some(generator) => generator(),
            None => Ok(None),
        };
        self.head = match next {
            Ok(Some(item)) => Head::Value(item),
            Ok(None) => {
                self.generator = None;
                Head::End
            }
            Err(err) => {
                log::debug!("generator failed, retiring it: {}", err);
                self.generator = None;
                Head::Failed(err)
            }
        };
    }

    /// True while the generator has not yet signalled its end.
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }
}

impl<T> Stream for LazyStream<T> {
    type Item = T;

    fn head(&self) -> StreamResult<Option<&T>> {
        match &self.head {
            Head::Value(item) => Ok(Some(item)),
            Head::Failed(err) => Err(err.clone()),
            Head::End => Ok(None),
        }
    }

    fn get(&mut self) -> StreamResult<Option<T>> {
        match std::mem::replace(&mut self.head, Head::End) {
            Head::Value(item) => {
                self.advance();
                Ok(Some(item))
            }
            Head::Failed(err) => Err(err),
            Head::End => Ok(None),
        }
    }

    fn is_exhausted(&self) -> bool {
        matches!(self.head, Head::End)
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyStream")
            .field("head", &self.head)
            .field("has_generator", &self.generator.is_some())
            .finish()
    }
}

/// Implements `Stream` for a decorator that forwards to the stream held in
/// its `inner` field.
macro_rules! delegate_stream {
    ($name:ident) => {
        impl<T> $crate::stream::core::Stream for $name<T> {
            type Item = T;

            fn head(&self) -> $crate::error::StreamResult<Option<&T>> {
                self.inner.head()
            }

            fn get(&mut self) -> $crate::error::StreamResult<Option<T>> {
                self.inner.get()
            }

            fn is_exhausted(&self) -> bool {
                self.inner.is_exhausted()
            }
        }

        impl<T: std::fmt::Debug> std::fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.inner).finish()
            }
        }
    };
}

pub(crate) use delegate_stream;

/// Passes through only the elements satisfying a predicate.
///
/// The predicate sees every candidate exactly once, including the ones it
/// rejects. Leading rejects are skipped on construction, so the head of a
/// `Filter` always satisfies the predicate.
pub struct Filter<T> {
    inner: LazyStream<T>,
}

impl<T: 'static> Filter<T> {
    pub fn new<S, P>(mut predicate: P, mut source: S) -> Self
    where
        S: Stream<Item = T> + 'static,
        P: FnMut(&T) -> bool + 'static,
    {
        let generator = move || -> StreamResult<Option<T>> {
            while let Some(item) = source.get()? {
                if predicate(&item) {
                    return Ok(Some(item));
                }
            }
            Ok(None)
        };
        Filter {
            inner: LazyStream::new(generator),
        }
    }
}

delegate_stream!(Filter);

/// Maps every element of a source stream.
///
/// Ends exactly when the source ends; any value the mapping returns is
/// passed on, however empty.
pub struct Transform<T> {
    inner: LazyStream<T>,
}

impl<U: 'static> Transform<U> {
    pub fn new<S, F>(mut mapping: F, mut source: S) -> Self
    where
        S: Stream + 'static,
        F: FnMut(S::Item) -> U + 'static,
    {
        let generator =
            move || -> StreamResult<Option<U>> { Ok(source.get()?.map(&mut mapping)) };
        Transform {
            inner: LazyStream::new(generator),
        }
    }

    /// Like [`Transform::new`], but a mapping error is parked in the stream
    /// and ends it.
    pub fn try_new<S, F>(mut mapping: F, mut source: S) -> Self
    where
        S: Stream + 'static,
        F: FnMut(S::Item) -> StreamResult<U> + 'static,
    {
        let generator = move || -> StreamResult<Option<U>> {
            match source.get()? {
                Some(item) => mapping(item).map(Some),
                None => Ok(None),
            }
        };
        Transform {
            inner: LazyStream::new(generator),
        }
    }
}

delegate_stream!(Transform);

/// Iterator over the remaining elements of a stream, yielding the first
/// error and then stopping.
pub struct Results<S> {
    stream: S,
    done: bool,
}

impl<S: Stream> Iterator for Results<S> {
    type Item = StreamResult<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.stream.get() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Extension trait providing the decorators as fluent combinators
pub trait StreamExt: Stream + Sized {
    fn filter<P>(self, predicate: P) -> Filter<Self::Item>
    where
        Self: 'static,
        Self::Item: 'static,
        P: FnMut(&Self::Item) -> bool + 'static;

    fn map<U, F>(self, mapping: F) -> Transform<U>
    where
        Self: 'static,
        U: 'static,
        F: FnMut(Self::Item) -> U + 'static;

    fn try_map<U, F>(self, mapping: F) -> Transform<U>
    where
        Self: 'static,
        U: 'static,
        F: FnMut(Self::Item) -> StreamResult<U> + 'static;

    fn parse<R, F>(self, parser: F) -> Parse<R>
    where
        Self: 'static,
        R: Unparsed + 'static,
        F: FnMut(Self::Item) -> R + 'static;

    fn rewindable(self) -> Rewindable<Self>
    where
        Self::Item: Clone;

    /// Round-robin merge with one other stream of the same type.
    fn merge(self, other: Self) -> Merge<Self::Item>
    where
        Self: 'static,
        Self::Item: 'static;

    fn boxed(self) -> BoxStream<Self::Item>
    where
        Self: 'static;

    /// Drain everything that is left.
    fn collect_vec(&mut self) -> StreamResult<Vec<Self::Item>>;

    fn into_results(self) -> Results<Self>;
}

impl<S: Stream + Sized> StreamExt for S {
    fn filter<P>(self, predicate: P) -> Filter<Self::Item>
    where
        Self: 'static,
        Self::Item: 'static,
        P: FnMut(&Self::Item) -> bool + 'static,
    {
        Filter::new(predicate, self)
    }

    fn map<U, F>(self, mapping: F) -> Transform<U>
    where
        Self: 'static,
        U: 'static,
        F: FnMut(Self::Item) -> U + 'static,
    {
        Transform::new(mapping, self)
    }

    fn try_map<U, F>(self, mapping: F) -> Transform<U>
    where
        Self: 'static,
        U: 'static,
        F: FnMut(Self::Item) -> StreamResult<U> + 'static,
    {
        Transform::try_new(mapping, self)
    }

    fn parse<R, F>(self, parser: F) -> Parse<R>
    where
        Self: 'static,
        R: Unparsed + 'static,
        F: FnMut(Self::Item) -> R + 'static,
    {
        Parse::new(parser, self)
    }

    fn rewindable(self) -> Rewindable<Self>
    where
        Self::Item: Clone,
    {
        Rewindable::new(self)
    }

    fn merge(self, other: Self) -> Merge<Self::Item>
    where
        Self: 'static,
        Self::Item: 'static,
    {
        Merge::from_live(vec![self, other])
    }

    fn boxed(self) -> BoxStream<Self::Item>
    where
        Self: 'static,
    {
        Box::new(self)
    }

    fn collect_vec(&mut self) -> StreamResult<Vec<Self::Item>> {
        let mut items = Vec::new();
        while let Some(item) = self.get()? {
            items.push(item);
        }
        Ok(items)
    }

    fn into_results(self) -> Results<Self> {
        Results {
            stream: self,
            done: false,
        }
    }
}
