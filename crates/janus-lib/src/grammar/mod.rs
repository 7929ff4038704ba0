//! Grammar combinators.
//!
//! Three roles, each a cheap-to-clone handle around a shared combinator node:
//! - [`Recognizer`] consumes input and produces nothing
//! - [`Parser<E, T>`](Parser) consumes input and produces a `T`
//! - [`Reducer<E, T, U>`](Reducer) consumes input and turns an accumulator `T` into a `U`
//!
//! Nodes are immutable once built. All per-call state lives in the stream and
//! in the values being threaded through, so one grammar can serve any number
//! of concurrent parses and prints.
//!
//! Composition goes through [`Then`] and [`Or`], which pick the result role
//! from the operand roles (e.g. recognizer then reducer is a reducer).

mod annotation;
mod choice;
mod initializer;
mod join;
mod lift;
mod parser;
mod plus;
mod recognizer;
mod reducer;
mod reference;
mod repeat;
mod sequence;
mod token;

#[cfg(test)]
mod lift_tests;

pub use initializer::Initializer;
pub use parser::{Parse, Parser};
pub use recognizer::{Recognize, Recognizer};
pub use reducer::{Reduce, Reducer};
pub use reference::Ref;

use janus_lexer::{TextSize, TokenStream};

/// Sequential composition.
pub trait Then<Rhs> {
    type Output;

    /// `self` followed by `rhs`.
    ///
    /// Without `allow_backtrack`, a failure of `rhs` after `self` matched is an
    /// [`Error::UnexpectedInput`](crate::Error::UnexpectedInput) instead of a
    /// non-match. The error propagates through enclosing [`Or`]s, so no other
    /// alternative is tried.
    fn then_with(&self, rhs: &Rhs, allow_backtrack: bool) -> Self::Output;

    /// `self` followed by `rhs`, committing once `self` matched.
    fn then(&self, rhs: &Rhs) -> Self::Output {
        self.then_with(rhs, false)
    }
}

/// Ordered choice. `rhs` is tried only if `self` does not match.
///
/// Printing tries `self` first as well, so the first alternative that can
/// print a value wins.
pub trait Or<Rhs> {
    type Output;

    fn or(&self, rhs: &Rhs) -> Self::Output;
}

pub(crate) fn restore(stream: &mut TokenStream<'_>, start: TextSize) {
    if stream.offset() != start {
        log::trace!("backtracking from {:?} to {:?}", stream.offset(), start);
        stream.set_offset(start);
    }
}
