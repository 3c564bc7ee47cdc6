//! Merge combinators: round-robin interleaving and caller-defined merge
//! functions, plus the rewindable variant used for correlation.
use std::collections::VecDeque;

use super::core::{delegate_stream, LazyStream, Stream};
use super::rewindable::IntoRewindable;
use crate::error::{StreamError, StreamResult};

/// Combines several input streams into one.
///
/// With [`Merge::round_robin`] inputs take turns and a dry input leaves the
/// rotation without ending the merge. With [`Merge::with_fn`] the merge
/// function decides every output element and sees the same input streams, in
/// the same order, on every call.
pub struct Merge<T> {
    inner: LazyStream<T>,
}

impl<T: 'static> Merge<T> {
    /// Round-robin merge; same as [`Merge::round_robin`].
    pub fn new<S>(streams: Vec<S>) -> StreamResult<Self>
    where
        S: Stream<Item = T> + 'static,
    {
        Self::round_robin(streams)
    }

    pub fn round_robin<S>(streams: Vec<S>) -> StreamResult<Self>
    where
        S: Stream<Item = T> + 'static,
    {
        if streams.is_empty() {
            return Err(StreamError::InvalidArgument(
                "merge needs at least one input stream".to_string(),
            ));
        }
        Ok(Self::from_live(streams))
    }

    pub(crate) fn from_live<S>(streams: Vec<S>) -> Self
    where
        S: Stream<Item = T> + 'static,
    {
        let total = streams.len();
        let mut live: VecDeque<S> = streams
            .into_iter()
            .filter(|s| !s.is_exhausted())
            .collect();
        log::trace!("round-robin merge over {} of {} inputs", live.len(), total);

        let generator = move || -> StreamResult<Option<T>> {
            while let Some(mut stream) = live.pop_front() {
                let item = stream.get()?;
                // A parked error keeps its place so it surfaces on its turn.
                if stream.is_exhausted() {
                    log::trace!("merge input ran dry, {} left", live.len());
                } else {
                    live.push_back(stream);
                }
                if item.is_some() {
                    return Ok(item);
                }
            }
            Ok(None)
        };
        Merge {
            inner: LazyStream::new(generator),
        }
    }

    /// Merge driven by `merge_fn`, which returns the next merged element or
    /// `None` to end the merge.
    pub fn with_fn<S, F>(mut merge_fn: F, streams: Vec<S>) -> StreamResult<Self>
    where
        S: Stream + 'static,
        F: FnMut(&mut [S]) -> StreamResult<Option<T>> + 'static,
    {
        if streams.is_empty() {
            return Err(StreamError::InvalidArgument(
                "merge needs at least one input stream".to_string(),
            ));
        }
        let mut streams = streams;
        let generator = move || -> StreamResult<Option<T>> { merge_fn(&mut streams) };
        Ok(Merge {
            inner: LazyStream::new(generator),
        })
    }
}

delegate_stream!(Merge);

/// A merge whose function only ever sees rewindable streams.
///
/// Inputs that are already [`Rewindable`](super::rewindable::Rewindable)
/// are used as they are; everything else is wrapped first. Order is kept.
///
/// Inputs must implement [`IntoRewindable`], which covers this crate's
/// streams and [`BoxStream`](super::core::BoxStream). A stream type defined
/// elsewhere is passed either boxed (`stream.boxed()`) or already wrapped
/// (`Rewindable::new(stream)`).
pub struct RewindableMerge<T> {
    inner: Merge<T>,
}

impl<T: 'static> RewindableMerge<T> {
    pub fn new<S, F>(merge_fn: F, streams: Vec<S>) -> StreamResult<Self>
    where
        S: IntoRewindable,
        S::Rewindable: 'static,
        F: FnMut(&mut [S::Rewindable]) -> StreamResult<Option<T>> + 'static,
    {
        let streams: Vec<S::Rewindable> = streams
            .into_iter()
            .map(IntoRewindable::into_rewindable)
            .collect();
        Ok(RewindableMerge {
            inner: Merge::with_fn(merge_fn, streams)?,
        })
    }
}

delegate_stream!(RewindableMerge);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::constructors::{empty, from_iter};
    use crate::stream::core::StreamExt;

    #[test]
    fn round_robin_skips_inputs_that_start_empty() {
        let mut merged =
            Merge::round_robin(vec![empty(), from_iter(vec![1, 2]), empty()]).unwrap();
        assert_eq!(merged.collect_vec().unwrap(), vec![1, 2]);
    }

    #[test]
    fn no_inputs_is_rejected() {
        let err = Merge::<u8>::round_robin(Vec::<crate::stream::LazyStream<u8>>::new())
            .err()
            .unwrap();
        assert!(matches!(err, StreamError::InvalidArgument(_)));
    }

    #[test]
    fn merge_fn_sees_inputs_in_order() {
        let mut merged = Merge::with_fn(
            |streams: &mut [crate::stream::LazyStream<&'static str>]| {
                match streams[1].get()? {
                    Some(item) => Ok(Some(item)),
                    None => streams[0].get(),
                }
            },
            vec![from_iter(vec!["a"]), from_iter(vec!["b"])],
        )
        .unwrap();
        assert_eq!(merged.collect_vec().unwrap(), vec!["b", "a"]);
    }
}
