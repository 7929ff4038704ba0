use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use janus_lexer::TokenStream;

use super::annotation::Annotated;
use super::lift::MappingReducer;
use super::plus::Plus;
use super::repeat::{Optional, Repeat};
use crate::cst::{Category, PartialCst};
use crate::mapping::{self, Mapping};
use crate::{Data, Outcome, Result};

/// A combinator that consumes input and turns an accumulator `T` into a `U`.
pub trait Reduce<E, T, U>: fmt::Display + Send + Sync {
    /// `Ok(None)` if the input does not match; the stream has not moved then.
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<U>;

    /// Match without an accumulator.
    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool>;

    /// Split `value` into the accumulator it was reduced from and the tree for
    /// the consumed input. `None` if this reducer cannot have produced it.
    fn print(&self, env: &E, value: &U) -> Outcome<PartialCst<T>>;
}

/// Shared handle to a reducer node.
pub struct Reducer<E, T, U>(Arc<dyn Reduce<E, T, U>>);

impl<E, T, U> Clone for Reducer<E, T, U> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<E: 'static, T: Data, U: Data> Reducer<E, T, U> {
    pub fn new(node: impl Reduce<E, T, U> + 'static) -> Self {
        Self(Arc::new(node))
    }

    /// Reducer that applies `mapping` without consuming input.
    pub fn mapping(mapping: impl Mapping<E, T, U> + 'static) -> Self {
        Self::new(MappingReducer::new(mapping))
    }

    #[inline]
    pub fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<U> {
        self.0.parse(env, stream, left)
    }

    #[inline]
    pub fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.0.recognize(env, stream)
    }

    #[inline]
    pub fn print(&self, env: &E, value: &U) -> Outcome<PartialCst<T>> {
        self.0.print(env, value)
    }

    /// Tag the printed tree with `category`. Parsing is unaffected.
    pub fn annotate(&self, category: Category) -> Self {
        Self::new(Annotated::new(self.clone(), category))
    }
}

impl<E: 'static, T: Data> Reducer<E, T, T> {
    /// Reducer that passes the accumulator through unchanged.
    pub fn identity() -> Self {
        Self::mapping(mapping::identity())
    }

    /// Zero or more, greedy.
    ///
    /// Printing peels elements until `self` no longer prints, so the element
    /// printer must eventually return `None` (e.g. a fold whose inverses stop
    /// at a minimum size).
    pub fn rep(&self) -> Self {
        Self::new(Repeat::new(self.clone()))
    }

    /// One or more.
    pub fn plus(&self) -> Self {
        self.at_least(NonZeroUsize::MIN)
    }

    /// `min` or more.
    pub fn at_least(&self, min: NonZeroUsize) -> Self {
        Self::new(Plus::new(self.clone(), min))
    }

    /// Zero or one. Without a match the accumulator passes through.
    pub fn opt(&self) -> Self {
        Self::new(Optional::new(self.clone(), false))
    }
}

impl<E, T, U> fmt::Display for Reducer<E, T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<E, T, U> fmt::Debug for Reducer<E, T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reducer({self})")
    }
}
