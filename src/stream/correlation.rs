//! Windowed correlation of two streams
//!
//! For every element `a` of the left stream, the right stream is scanned a
//! bounded distance ahead for an element matching `a`. The scan is done under
//! a bookmark: a hit removes only the matched element and puts the rest back,
//! a miss rewinds the right stream entirely. Unmatched right-hand elements are
//! therefore never lost or reordered, and memory stays within one window.
use std::cell::Cell;
use std::rc::Rc;

use super::core::{BoxStream, Stream, StreamExt};
use super::merge::RewindableMerge;
use super::rewindable::{Rewindable, RewindableStream};
use crate::error::{StreamError, StreamResult};
use crate::stream_configuration::CorrelationConfig;

type Matcher<T> = Box<dyn FnMut(&T, &T) -> bool>;

/// Running totals of a correlation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelationStats {
    /// Left elements that found a partner.
    pub matched: usize,
    /// Left elements dropped for lack of a partner inside the window.
    pub unmatched: usize,
    /// Right elements pulled while scanning, counting rescans.
    pub scanned: usize,
}

pub struct Correlation<T, O> {
    lookahead: usize,
    matches: Matcher<T>,
    combine: Box<dyn FnMut(T, T) -> O>,
    horizon: Option<Matcher<T>>,
    stats: Rc<Cell<CorrelationStats>>,
}

impl<T: 'static, O: 'static> Correlation<T, O> {
    pub fn new<M, C>(config: &CorrelationConfig, matches: M, combine: C) -> StreamResult<Self>
    where
        M: FnMut(&T, &T) -> bool + 'static,
        C: FnMut(T, T) -> O + 'static,
    {
        if config.lookahead == 0 {
            return Err(StreamError::InvalidArgument(
                "correlation lookahead must be at least 1".to_string(),
            ));
        }
        Ok(Correlation {
            lookahead: config.lookahead,
            matches: Box::new(matches),
            combine: Box::new(combine),
            horizon: None,
            stats: Rc::new(Cell::new(CorrelationStats::default())),
        })
    }

    /// Stop scanning at the first right element for which `within(a, b)` is
    /// false, e.g. once its timestamp is too far past `a`'s.
    pub fn with_horizon<H>(mut self, within: H) -> Self
    where
        H: FnMut(&T, &T) -> bool + 'static,
    {
        self.horizon = Some(Box::new(within));
        self
    }

    pub fn stats(&self) -> CorrelationStats {
        self.stats.get()
    }

    /// Shared view of the counters that stays valid after the correlation
    /// has been moved into a merge.
    pub fn stats_handle(&self) -> Rc<Cell<CorrelationStats>> {
        Rc::clone(&self.stats)
    }

    fn record(&self, update: impl FnOnce(&mut CorrelationStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    /// Produce the next combined pair, or `None` once the left stream ends.
    ///
    /// If the right stream fails mid-scan, the elements scanned so far are
    /// put back before the error is returned.
    pub fn step<L, R>(&mut self, left: &mut L, right: &mut R) -> StreamResult<Option<O>>
    where
        L: Stream<Item = T>,
        R: RewindableStream<Item = T>,
    {
        while let Some(a) = left.get()? {
            right.bookmark();
            let partner = match self.scan(&a, right) {
                Ok(partner) => partner,
                Err(err) => {
                    log::debug!("right stream failed during scan, rewinding: {}", err);
                    right.rewind()?;
                    return Err(err);
                }
            };

            match partner {
                Some(b) => {
                    let mut scanned = std::mem::take(right.saved_mut()?);
                    scanned.pop();
                    log::trace!("matched after scanning {} elements", scanned.len() + 1);
                    right.discard()?;
                    right.prepend(scanned);
                    self.record(|s| s.matched += 1);
                    return Ok(Some((self.combine)(a, b)));
                }
                None => {
                    log::trace!("no match inside window, rewinding");
                    right.rewind()?;
                    self.record(|s| s.unmatched += 1);
                }
            }
        }
        Ok(None)
    }

    // Pull at most one window from `right` under the caller's bookmark.
    fn scan<R>(&mut self, a: &T, right: &mut R) -> StreamResult<Option<T>>
    where
        R: RewindableStream<Item = T>,
    {
        for _ in 0..self.lookahead {
            let b = match right.get()? {
                Some(b) => b,
                None => break,
            };
            self.record(|s| s.scanned += 1);
            if let Some(within) = self.horizon.as_mut() {
                if !within(a, &b) {
                    break;
                }
            }
            if (self.matches)(a, &b) {
                return Ok(Some(b));
            }
        }
        Ok(None)
    }

    /// Adapt to a merge function over exactly two rewindable streams, left
    /// first.
    pub fn into_merge_fn<R>(mut self) -> impl FnMut(&mut [R]) -> StreamResult<Option<O>>
    where
        R: RewindableStream<Item = T>,
    {
        move |streams: &mut [R]| {
            let count = streams.len();
            match streams {
                [left, right] => self.step(left, right),
                _ => Err(StreamError::InvalidArgument(format!(
                    "correlation needs exactly two streams, got {}",
                    count
                ))),
            }
        }
    }
}

/// Correlate `left` against `right` with a count-bounded window.
pub fn correlate<T, O, L, R, M, C>(
    left: L,
    right: R,
    config: &CorrelationConfig,
    matches: M,
    combine: C,
) -> StreamResult<RewindableMerge<O>>
where
    T: Clone + 'static,
    O: 'static,
    L: Stream<Item = T> + 'static,
    R: Stream<Item = T> + 'static,
    M: FnMut(&T, &T) -> bool + 'static,
    C: FnMut(T, T) -> O + 'static,
{
    let correlation = Correlation::new(config, matches, combine)?;
    RewindableMerge::new(
        correlation.into_merge_fn::<Rewindable<BoxStream<T>>>(),
        vec![left.boxed(), right.boxed()],
    )
}
