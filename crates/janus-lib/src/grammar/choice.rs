//! Ordered choice.
//!
//! Every branch restores the stream when it does not match, so the second
//! branch always starts where the first one did. Errors are not non-matches:
//! they propagate without trying the second branch.

use std::fmt;

use janus_lexer::TokenStream;

use super::{Or, Parse, Parser, Recognize, Recognizer, Reduce, Reducer};
use crate::cst::{Cst, PartialCst};
use crate::{Data, Outcome, Result};

pub(super) struct Choice<A, B> {
    first: A,
    second: B,
}

impl<A, B> Choice<A, B> {
    pub(super) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Choice<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} | {})", self.first, self.second)
    }
}

impl<E: 'static> Recognize<E> for Choice<Recognizer<E>, Recognizer<E>> {
    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        if self.first.recognize(env, stream)? {
            return Ok(true);
        }
        self.second.recognize(env, stream)
    }

    /// Recognizers have no value to pick a branch by; the first one is canonical.
    fn print(&self, env: &E) -> Cst {
        self.first.print(env)
    }
}

impl<E: 'static> Or<Recognizer<E>> for Recognizer<E> {
    type Output = Recognizer<E>;

    fn or(&self, rhs: &Recognizer<E>) -> Recognizer<E> {
        Recognizer::new(Choice::new(self.clone(), rhs.clone()))
    }
}

impl<E: 'static, T: Data> Parse<E, T> for Choice<Parser<E, T>, Parser<E, T>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<T> {
        if let Some(value) = self.first.parse(env, stream)? {
            return Ok(Some(value));
        }
        self.second.parse(env, stream)
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        if self.first.recognize(env, stream)? {
            return Ok(true);
        }
        self.second.recognize(env, stream)
    }

    fn print(&self, env: &E, value: &T) -> Outcome<Cst> {
        if let Some(tree) = self.first.print(env, value)? {
            return Ok(Some(tree));
        }
        self.second.print(env, value)
    }
}

impl<E: 'static, T: Data> Or<Parser<E, T>> for Parser<E, T> {
    type Output = Parser<E, T>;

    fn or(&self, rhs: &Parser<E, T>) -> Parser<E, T> {
        Parser::new(Choice::new(self.clone(), rhs.clone()))
    }
}

impl<E: 'static, T: Data, U: Data> Reduce<E, T, U> for Choice<Reducer<E, T, U>, Reducer<E, T, U>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<U> {
        if let Some(value) = self.first.parse(env, stream, left)? {
            return Ok(Some(value));
        }
        self.second.parse(env, stream, left)
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        if self.first.recognize(env, stream)? {
            return Ok(true);
        }
        self.second.recognize(env, stream)
    }

    fn print(&self, env: &E, value: &U) -> Outcome<PartialCst<T>> {
        if let Some(partial) = self.first.print(env, value)? {
            return Ok(Some(partial));
        }
        self.second.print(env, value)
    }
}

impl<E: 'static, T: Data, U: Data> Or<Reducer<E, T, U>> for Reducer<E, T, U> {
    type Output = Reducer<E, T, U>;

    fn or(&self, rhs: &Reducer<E, T, U>) -> Reducer<E, T, U> {
        Reducer::new(Choice::new(self.clone(), rhs.clone()))
    }
}
