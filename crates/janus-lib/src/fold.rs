//! Bidirectional update primitive.
//!
//! A fold combines an accumulator with the value a parser produced. Printing
//! runs it backwards: the two inverses split a finished value into the
//! accumulator and the value that went into it. Either inverse may report
//! `None`, meaning the fold does not apply to that value; repetition uses this
//! to know when to stop peeling.
//!
//! Folds must not mutate their inputs. Backtracking keeps older accumulators
//! alive, and they have to stay valid.

use std::marker::PhantomData;

use janus_lexer::TokenStream;

use crate::{Outcome, Result};

/// `apply(left, right) -> result` with partial inverses.
///
/// For every `left` and `right` in its domain, a fold satisfies
/// `left_inverse(apply(left, right)) == Some(left)` and
/// `right_inverse(apply(left, right)) == Some(right)`.
pub trait Fold<E, T, V, R = T>: Send + Sync {
    fn apply(&self, env: &E, stream: &TokenStream<'_>, left: &T, right: V) -> Result<R>;

    fn left_inverse(&self, env: &E, result: &R) -> Outcome<T>;

    fn right_inverse(&self, env: &E, result: &R) -> Outcome<V>;
}

/// Fold built from closures. See [`from_fn`].
pub struct FnFold<E, T, V, R, A, L, Rt> {
    apply: A,
    left: L,
    right: Rt,
    _marker: PhantomData<fn(&E, &T, V) -> R>,
}

/// Build a fold from an `apply` closure and its two inverses.
pub fn from_fn<E, T, V, R, A, L, Rt>(apply: A, left: L, right: Rt) -> FnFold<E, T, V, R, A, L, Rt>
where
    A: Fn(&E, &TokenStream<'_>, &T, V) -> Result<R> + Send + Sync,
    L: Fn(&E, &R) -> Outcome<T> + Send + Sync,
    Rt: Fn(&E, &R) -> Outcome<V> + Send + Sync,
{
    FnFold {
        apply,
        left,
        right,
        _marker: PhantomData,
    }
}

impl<E, T, V, R, A, L, Rt> Fold<E, T, V, R> for FnFold<E, T, V, R, A, L, Rt>
where
    A: Fn(&E, &TokenStream<'_>, &T, V) -> Result<R> + Send + Sync,
    L: Fn(&E, &R) -> Outcome<T> + Send + Sync,
    Rt: Fn(&E, &R) -> Outcome<V> + Send + Sync,
{
    fn apply(&self, env: &E, stream: &TokenStream<'_>, left: &T, right: V) -> Result<R> {
        (self.apply)(env, stream, left, right)
    }

    fn left_inverse(&self, env: &E, result: &R) -> Outcome<T> {
        (self.left)(env, result)
    }

    fn right_inverse(&self, env: &E, result: &R) -> Outcome<V> {
        (self.right)(env, result)
    }
}

#[cfg(test)]
#[path = "fold_tests.rs"]
mod fold_tests;
