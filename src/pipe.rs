use std::rc::Rc;

use crate::stream::{BoxStream, Stream, StreamExt, Unparsed};

/// A Pipe represents a stream transformation from one type to another.
/// It's a function from Stream[I] to Stream[O], reusable across sources.
pub struct Pipe<I, O> {
    f: Rc<dyn Fn(BoxStream<I>) -> BoxStream<O>>,
}

impl<I, O> Clone for Pipe<I, O> {
    fn clone(&self) -> Self {
        Pipe {
            f: Rc::clone(&self.f),
        }
    }
}

impl<I, O> Pipe<I, O> {
    /// Create a new pipe from a function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(BoxStream<I>) -> BoxStream<O> + 'static,
    {
        Pipe { f: Rc::new(f) }
    }

    /// Apply this pipe to a stream
    pub fn apply<S>(&self, input: S) -> BoxStream<O>
    where
        S: Stream<Item = I> + 'static,
    {
        (self.f)(input.boxed())
    }
}

/// Create a pipe that applies the given function to each element
pub fn map<I, O, F>(f: F) -> Pipe<I, O>
where
    F: Fn(I) -> O + Clone + 'static,
    I: 'static,
    O: 'static,
{
    Pipe::new(move |input| input.map(f.clone()).boxed())
}

/// Create a pipe that filters elements based on the predicate
pub fn filter<I, F>(predicate: F) -> Pipe<I, I>
where
    F: Fn(&I) -> bool + Clone + 'static,
    I: 'static,
{
    Pipe::new(move |input| input.filter(predicate.clone()).boxed())
}

/// Create a pipe that parses each element and drops the unparsed ones
pub fn parse<I, R, F>(parser: F) -> Pipe<I, R>
where
    F: Fn(I) -> R + Clone + 'static,
    I: 'static,
    R: Unparsed + 'static,
{
    Pipe::new(move |input| input.parse(parser.clone()).boxed())
}

/// Compose two pipes together
pub fn compose<I, M, O>(p1: Pipe<I, M>, p2: Pipe<M, O>) -> Pipe<I, O>
where
    I: 'static,
    M: 'static,
    O: 'static,
{
    Pipe::new(move |input| (p2.f)((p1.f)(input)))
}

/// Identity pipe that doesn't transform the stream
pub fn identity<I: 'static>() -> Pipe<I, I> {
    Pipe::new(|input| input)
}

/// Extension trait for pipes
pub trait PipeExt<I, O> {
    /// Compose this pipe with another pipe
    fn compose<P>(self, other: Pipe<O, P>) -> Pipe<I, P>
    where
        P: 'static;
}

impl<I, O> PipeExt<I, O> for Pipe<I, O>
where
    I: 'static,
    O: 'static,
{
    fn compose<P>(self, other: Pipe<O, P>) -> Pipe<I, P>
    where
        P: 'static,
    {
        compose(self, other)
    }
}
