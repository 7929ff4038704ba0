//! Lifting values and recognizers into reducers.

use std::fmt;
use std::sync::Arc;

use janus_lexer::TokenStream;

use super::{Or, Parser, Recognizer, Reduce, Reducer, Then};
use crate::cst::{Cst, PartialCst};
use crate::fold::Fold;
use crate::mapping::Mapping;
use crate::{Data, Outcome, Result};

/// Applies a mapping to the accumulator. Consumes nothing.
pub(super) struct MappingReducer<E, T, U> {
    mapping: Arc<dyn Mapping<E, T, U>>,
}

impl<E, T, U> MappingReducer<E, T, U> {
    pub(super) fn new(mapping: impl Mapping<E, T, U> + 'static) -> Self {
        Self {
            mapping: Arc::new(mapping),
        }
    }
}

impl<E, T: Data, U: Data> Reduce<E, T, U> for MappingReducer<E, T, U> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<U> {
        self.mapping.parse(env, stream, left).map(Some)
    }

    fn recognize(&self, _env: &E, _stream: &mut TokenStream<'_>) -> Result<bool> {
        Ok(true)
    }

    fn print(&self, env: &E, value: &U) -> Outcome<PartialCst<T>> {
        Ok(self
            .mapping
            .left(env, value)?
            .map(|left| PartialCst::new(left, Cst::empty())))
    }
}

impl<E, T, U> fmt::Display for MappingReducer<E, T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("map")
    }
}

/// Parses a value and folds it into the accumulator.
pub(super) struct FoldReducer<E, T, V, R> {
    parser: Parser<E, V>,
    fold: Arc<dyn Fold<E, T, V, R>>,
}

impl<E, T, V, R> FoldReducer<E, T, V, R> {
    pub(super) fn new(parser: Parser<E, V>, fold: impl Fold<E, T, V, R> + 'static) -> Self {
        Self {
            parser,
            fold: Arc::new(fold),
        }
    }
}

impl<E: 'static, T: Data, V: Data, R: Data> Reduce<E, T, R> for FoldReducer<E, T, V, R> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<R> {
        let Some(right) = self.parser.parse(env, stream)? else {
            return Ok(None);
        };
        self.fold.apply(env, stream, left, right).map(Some)
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.parser.recognize(env, stream)
    }

    fn print(&self, env: &E, value: &R) -> Outcome<PartialCst<T>> {
        let Some(left) = self.fold.left_inverse(env, value)? else {
            return Ok(None);
        };
        let Some(right) = self.fold.right_inverse(env, value)? else {
            return Ok(None);
        };
        Ok(self
            .parser
            .print(env, &right)?
            .map(|tree| PartialCst::new(left, tree)))
    }
}

impl<E, T, V, R> fmt::Display for FoldReducer<E, T, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.parser, f)
    }
}

/// A recognizer as an alternative to a reducer: the recognizer branch keeps
/// the accumulator as is.
impl<E: 'static, T: Data> Or<Reducer<E, T, T>> for Recognizer<E> {
    type Output = Reducer<E, T, T>;

    fn or(&self, rhs: &Reducer<E, T, T>) -> Reducer<E, T, T> {
        let lifted: Reducer<E, T, T> = self.then(&Reducer::identity());
        lifted.or(rhs)
    }
}

impl<E: 'static, T: Data> Or<Recognizer<E>> for Reducer<E, T, T> {
    type Output = Reducer<E, T, T>;

    fn or(&self, rhs: &Recognizer<E>) -> Reducer<E, T, T> {
        let lifted: Reducer<E, T, T> = rhs.then(&Reducer::identity());
        self.or(&lifted)
    }
}
