//! Category tags on printed trees.

use std::fmt;

use janus_lexer::TokenStream;

use super::{Parse, Parser, Recognize, Recognizer, Reduce, Reducer};
use crate::cst::{Category, Cst, PartialCst};
use crate::{Data, Outcome, Result};

pub(super) struct Annotated<X> {
    inner: X,
    category: Category,
}

impl<X> Annotated<X> {
    pub(super) fn new(inner: X, category: Category) -> Self {
        Self { inner, category }
    }
}

impl<X: fmt::Display> fmt::Display for Annotated<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<E: 'static> Recognize<E> for Annotated<Recognizer<E>> {
    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.inner.recognize(env, stream)
    }

    fn print(&self, env: &E) -> Cst {
        self.inner.print(env).annotate(self.category)
    }
}

impl<E: 'static, T: Data> Parse<E, T> for Annotated<Parser<E, T>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<T> {
        self.inner.parse(env, stream)
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.inner.recognize(env, stream)
    }

    fn print(&self, env: &E, value: &T) -> Outcome<Cst> {
        Ok(self
            .inner
            .print(env, value)?
            .map(|tree| tree.annotate(self.category)))
    }
}

impl<E: 'static, T: Data, U: Data> Reduce<E, T, U> for Annotated<Reducer<E, T, U>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<U> {
        self.inner.parse(env, stream, left)
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.inner.recognize(env, stream)
    }

    /// Only the consumed part is tagged; the accumulator printed elsewhere is not.
    fn print(&self, env: &E, value: &U) -> Outcome<PartialCst<T>> {
        Ok(self
            .inner
            .print(env, value)?
            .map(|partial| partial.map_tree(|tree| tree.annotate(self.category))))
    }
}
