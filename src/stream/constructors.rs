//! Stream constructors: generator, iter, empty, once, repeat_with, unfold
use super::core::LazyStream;
use crate::error::StreamResult;

// ================================
// Basic Constructors
// ================================

/// Stream driven by a caller-supplied generator.
pub fn from_generator<T, G>(generator: G) -> LazyStream<T>
where
    T: 'static,
    G: FnMut() -> StreamResult<Option<T>> + 'static,
{
    LazyStream::new(generator)
}

/// Stream over the items of an iterator.
pub fn from_iter<I>(iter: I) -> LazyStream<I::Item>
where
    I: IntoIterator,
    I::IntoIter: 'static,
    I::Item: 'static,
{
    let mut iter = iter.into_iter();
    LazyStream::new(move || Ok(iter.next()))
}

pub fn empty<T: 'static>() -> LazyStream<T> {
    LazyStream::new(|| Ok(None))
}

pub fn once<T: 'static>(value: T) -> LazyStream<T> {
    let mut value = Some(value);
    LazyStream::new(move || Ok(value.take()))
}

/// Endless stream calling `f` for every element.
pub fn repeat_with<T, F>(mut f: F) -> LazyStream<T>
where
    T: 'static,
    F: FnMut() -> T + 'static,
{
    LazyStream::new(move || Ok(Some(f())))
}

/// Stream threading a state value through `f` until it returns `None`.
pub fn unfold<T, St, F>(init: St, mut f: F) -> LazyStream<T>
where
    T: 'static,
    St: 'static,
    F: FnMut(St) -> Option<(T, St)> + 'static,
{
    let mut state = Some(init);
    LazyStream::new(move || {
        Ok(state.take().and_then(|current| {
            f(current).map(|(item, next)| {
                state = Some(next);
                item
            })
        }))
    })
}
