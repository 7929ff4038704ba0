//! Input-free value conversions.
//!
//! A mapping turns one value into another without consuming input and knows
//! how to undo it for printing. Token parsers use a `Mapping<E, String, T>`
//! to convert the matched text; [`Reducer::mapping`](crate::Reducer::mapping)
//! turns any mapping into a reducer.

use std::marker::PhantomData;

use janus_lexer::TokenStream;

use crate::{Data, Outcome, Result};

pub trait Mapping<E, T, U>: Send + Sync {
    fn parse(&self, env: &E, stream: &TokenStream<'_>, input: &T) -> Result<U>;

    /// Undo `parse`. `None` if `result` is outside this mapping's image.
    fn left(&self, env: &E, result: &U) -> Outcome<T>;
}

/// Mapping that returns its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

pub fn identity() -> Identity {
    Identity
}

impl<E, T: Data> Mapping<E, T, T> for Identity {
    fn parse(&self, _env: &E, _stream: &TokenStream<'_>, input: &T) -> Result<T> {
        Ok(input.clone())
    }

    fn left(&self, _env: &E, result: &T) -> Outcome<T> {
        Ok(Some(result.clone()))
    }
}

/// Mapping built from closures. See [`from_fn`].
pub struct FnMapping<E, T, U, P, L> {
    parse: P,
    left: L,
    _marker: PhantomData<fn(&E, &T) -> U>,
}

/// Build a mapping from a conversion and its inverse.
pub fn from_fn<E, T, U, P, L>(parse: P, left: L) -> FnMapping<E, T, U, P, L>
where
    P: Fn(&E, &TokenStream<'_>, &T) -> Result<U> + Send + Sync,
    L: Fn(&E, &U) -> Outcome<T> + Send + Sync,
{
    FnMapping {
        parse,
        left,
        _marker: PhantomData,
    }
}

impl<E, T, U, P, L> Mapping<E, T, U> for FnMapping<E, T, U, P, L>
where
    P: Fn(&E, &TokenStream<'_>, &T) -> Result<U> + Send + Sync,
    L: Fn(&E, &U) -> Outcome<T> + Send + Sync,
{
    fn parse(&self, env: &E, stream: &TokenStream<'_>, input: &T) -> Result<U> {
        (self.parse)(env, stream, input)
    }

    fn left(&self, env: &E, result: &U) -> Outcome<T> {
        (self.left)(env, result)
    }
}
