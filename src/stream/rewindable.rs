//! Bookmark / rewind / prepend support on top of any stream
//!
//! A `Rewindable` keeps a stack of reinserted elements in front of its
//! source. While a bookmark is active every consumed element is also copied
//! into the saved list, which `rewind` pushes back onto that stack.
use std::fmt;

use super::core::{BoxStream, Filter, LazyStream, Stream, Transform};
use super::merge::{Merge, RewindableMerge};
use super::parse::Parse;
use crate::error::{StreamError, StreamResult};

/// Stream operations for looking backwards.
pub trait RewindableStream: Stream {
    /// Start recording consumed elements, dropping any earlier bookmark.
    fn bookmark(&mut self);

    /// Forget the bookmark and what it recorded; position is unchanged.
    fn discard(&mut self) -> StreamResult<()>;

    /// Put everything consumed since the bookmark back in front of the
    /// stream, then forget the bookmark.
    fn rewind(&mut self) -> StreamResult<()>;

    /// Push elements to the front; the first one becomes the head.
    fn prepend(&mut self, items: Vec<Self::Item>);

    /// Elements consumed since the bookmark, oldest first.
    fn saved(&self) -> StreamResult<&[Self::Item]>;

    fn saved_mut(&mut self) -> StreamResult<&mut Vec<Self::Item>>;

    fn has_bookmark(&self) -> bool;
}

/// Wraps a source stream with a single bookmark and a prepend queue.
pub struct Rewindable<S: Stream> {
    source: S,
    // Top of the stack is the next element served.
    queue: Vec<S::Item>,
    saved: Option<Vec<S::Item>>,
}

impl<S: Stream> Rewindable<S>
where
    S::Item: Clone,
{
    pub fn new(source: S) -> Self {
        Rewindable {
            source,
            queue: Vec::new(),
            saved: None,
        }
    }

    /// Unwrap the source; prepended elements and the bookmark are lost.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Stream> Stream for Rewindable<S>
where
    S::Item: Clone,
{
    type Item = S::Item;

    fn head(&self) -> StreamResult<Option<&Self::Item>> {
        match self.queue.last() {
            Some(item) => Ok(Some(item)),
            None => self.source.head(),
        }
    }

    fn get(&mut self) -> StreamResult<Option<Self::Item>> {
        let item = match self.queue.pop() {
            Some(item) => Some(item),
            None => self.source.get()?,
        };
        if let (Some(saved), Some(item)) = (self.saved.as_mut(), item.as_ref()) {
            saved.push(item.clone());
        }
        Ok(item)
    }

    fn is_exhausted(&self) -> bool {
        self.queue.is_empty() && self.source.is_exhausted()
    }
}

impl<S: Stream> RewindableStream for Rewindable<S>
where
    S::Item: Clone,
{
    fn bookmark(&mut self) {
        if self.saved.is_some() {
            log::trace!("replacing active bookmark");
        }
        self.saved = Some(Vec::new());
    }

    fn discard(&mut self) -> StreamResult<()> {
        self.saved.take().map(drop).ok_or(StreamError::NoBookmark)
    }

    fn rewind(&mut self) -> StreamResult<()> {
        let saved = self.saved.take().ok_or(StreamError::NoBookmark)?;
        log::trace!("rewinding {} elements", saved.len());
        self.prepend(saved);
        Ok(())
    }

    fn prepend(&mut self, items: Vec<Self::Item>) {
        self.queue.extend(items.into_iter().rev());
    }

    fn saved(&self) -> StreamResult<&[Self::Item]> {
        self.saved.as_deref().ok_or(StreamError::NoBookmark)
    }

    fn saved_mut(&mut self) -> StreamResult<&mut Vec<Self::Item>> {
        self.saved.as_mut().ok_or(StreamError::NoBookmark)
    }

    fn has_bookmark(&self) -> bool {
        self.saved.is_some()
    }
}

impl<S> fmt::Debug for Rewindable<S>
where
    S: Stream + fmt::Debug,
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rewindable")
            .field("source", &self.source)
            .field("queue", &self.queue)
            .field("saved", &self.saved)
            .finish()
    }
}

/// Conversion used by [`RewindableMerge`]: wrap a stream unless it already
/// supports rewinding.
pub trait IntoRewindable: Stream + Sized {
    type Rewindable: RewindableStream<Item = Self::Item>;

    fn into_rewindable(self) -> Self::Rewindable;
}

impl<S: Stream> IntoRewindable for Rewindable<S>
where
    S::Item: Clone,
{
    type Rewindable = Self;

    fn into_rewindable(self) -> Self {
        self
    }
}

macro_rules! wrap_rewindable {
    ($($name:ident),*) => {
        $(
            impl<T: Clone> IntoRewindable for $name<T> {
                type Rewindable = Rewindable<Self>;

                fn into_rewindable(self) -> Self::Rewindable {
                    Rewindable::new(self)
                }
            }
        )*
    };
}

wrap_rewindable!(LazyStream, Filter, Transform, Parse, Merge, RewindableMerge);

impl<T: Clone> IntoRewindable for BoxStream<T> {
    type Rewindable = Rewindable<Self>;

    fn into_rewindable(self) -> Self::Rewindable {
        Rewindable::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::constructors::from_iter;

    #[test]
    fn saved_records_only_consumed_elements() {
        let mut stream = Rewindable::new(from_iter(vec![1, 2, 3]));
        stream.bookmark();
        stream.head().unwrap();
        stream.get().unwrap();
        stream.head().unwrap();
        assert_eq!(stream.saved().unwrap(), &[1]);
    }

    #[test]
    fn second_bookmark_drops_first_history() {
        let mut stream = Rewindable::new(from_iter(vec![1, 2, 3]));
        stream.bookmark();
        stream.get().unwrap();
        stream.bookmark();
        assert!(stream.saved().unwrap().is_empty());
        stream.get().unwrap();
        stream.rewind().unwrap();
        assert_eq!(stream.head().unwrap(), Some(&2));
    }

    #[test]
    fn already_rewindable_is_not_wrapped_again() {
        let mut stream = Rewindable::new(from_iter(vec!["a", "b"]));
        stream.bookmark();
        let mut same = stream.into_rewindable();
        assert!(same.has_bookmark());
        assert_eq!(same.get().unwrap(), Some("a"));
    }
}
