//! Sequential composition for every pair of roles.
//!
//! Parsing runs left then right. Printing a reducer sequence runs the other
//! way: the right reducer splits the value first, and the accumulator it
//! hands back is what the left reducer prints. The trees are still
//! concatenated left to right.

use std::fmt;

use janus_lexer::{TextSize, TokenStream};

use super::{Parse, Parser, Recognize, Recognizer, Reduce, Reducer, Then, restore};
use crate::cst::{Cst, PartialCst};
use crate::{Data, Error, Outcome, Result};

pub(super) struct Sequence<L, R> {
    left: L,
    right: R,
    allow_backtrack: bool,
}

impl<L, R: fmt::Display> Sequence<L, R> {
    fn new(left: L, right: R, allow_backtrack: bool) -> Self {
        Self {
            left,
            right,
            allow_backtrack,
        }
    }

    /// `left` matched from `start` and `right` did not.
    fn right_failed(&self, stream: &mut TokenStream<'_>, start: TextSize) -> Result<()> {
        if !self.allow_backtrack {
            return Err(Error::UnexpectedInput {
                offset: stream.next_offset()?,
                expected: self.right.to_string(),
            });
        }
        restore(stream, start);
        Ok(())
    }

    /// Shared `recognize` for every pair: both halves in order.
    fn recognize_both(
        &self,
        stream: &mut TokenStream<'_>,
        left: impl FnOnce(&mut TokenStream<'_>) -> Result<bool>,
        right: impl FnOnce(&mut TokenStream<'_>) -> Result<bool>,
    ) -> Result<bool> {
        let start = stream.offset();
        if !left(stream)? {
            return Ok(false);
        }
        if !right(stream)? {
            self.right_failed(stream, start)?;
            return Ok(false);
        }
        Ok(true)
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Sequence<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.left, self.right)
    }
}

impl<E: 'static> Recognize<E> for Sequence<Recognizer<E>, Recognizer<E>> {
    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.recognize_both(
            stream,
            |s| self.left.recognize(env, s),
            |s| self.right.recognize(env, s),
        )
    }

    fn print(&self, env: &E) -> Cst {
        self.left.print(env).then(self.right.print(env))
    }
}

impl<E: 'static> Then<Recognizer<E>> for Recognizer<E> {
    type Output = Recognizer<E>;

    fn then_with(&self, rhs: &Recognizer<E>, allow_backtrack: bool) -> Recognizer<E> {
        Recognizer::new(Sequence::new(self.clone(), rhs.clone(), allow_backtrack))
    }
}

impl<E: 'static, T: Data> Parse<E, T> for Sequence<Recognizer<E>, Parser<E, T>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<T> {
        let start = stream.offset();
        if !self.left.recognize(env, stream)? {
            return Ok(None);
        }
        let Some(value) = self.right.parse(env, stream)? else {
            self.right_failed(stream, start)?;
            return Ok(None);
        };
        Ok(Some(value))
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.recognize_both(
            stream,
            |s| self.left.recognize(env, s),
            |s| self.right.recognize(env, s),
        )
    }

    fn print(&self, env: &E, value: &T) -> Outcome<Cst> {
        let Some(tree) = self.right.print(env, value)? else {
            return Ok(None);
        };
        Ok(Some(self.left.print(env).then(tree)))
    }
}

impl<E: 'static, T: Data> Then<Parser<E, T>> for Recognizer<E> {
    type Output = Parser<E, T>;

    fn then_with(&self, rhs: &Parser<E, T>, allow_backtrack: bool) -> Parser<E, T> {
        Parser::new(Sequence::new(self.clone(), rhs.clone(), allow_backtrack))
    }
}

impl<E: 'static, T: Data> Parse<E, T> for Sequence<Parser<E, T>, Recognizer<E>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<T> {
        let start = stream.offset();
        let Some(value) = self.left.parse(env, stream)? else {
            return Ok(None);
        };
        if !self.right.recognize(env, stream)? {
            self.right_failed(stream, start)?;
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.recognize_both(
            stream,
            |s| self.left.recognize(env, s),
            |s| self.right.recognize(env, s),
        )
    }

    fn print(&self, env: &E, value: &T) -> Outcome<Cst> {
        let Some(tree) = self.left.print(env, value)? else {
            return Ok(None);
        };
        Ok(Some(tree.then(self.right.print(env))))
    }
}

impl<E: 'static, T: Data> Then<Recognizer<E>> for Parser<E, T> {
    type Output = Parser<E, T>;

    fn then_with(&self, rhs: &Recognizer<E>, allow_backtrack: bool) -> Parser<E, T> {
        Parser::new(Sequence::new(self.clone(), rhs.clone(), allow_backtrack))
    }
}

impl<E: 'static, T: Data, U: Data> Parse<E, U> for Sequence<Parser<E, T>, Reducer<E, T, U>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<U> {
        let start = stream.offset();
        let Some(left) = self.left.parse(env, stream)? else {
            return Ok(None);
        };
        let Some(value) = self.right.parse(env, stream, &left)? else {
            self.right_failed(stream, start)?;
            return Ok(None);
        };
        Ok(Some(value))
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.recognize_both(
            stream,
            |s| self.left.recognize(env, s),
            |s| self.right.recognize(env, s),
        )
    }

    fn print(&self, env: &E, value: &U) -> Outcome<Cst> {
        let Some(right) = self.right.print(env, value)? else {
            return Ok(None);
        };
        let Some(left) = self.left.print(env, &right.left)? else {
            return Ok(None);
        };
        Ok(Some(left.then(right.tree)))
    }
}

impl<E: 'static, T: Data, U: Data> Then<Reducer<E, T, U>> for Parser<E, T> {
    type Output = Parser<E, U>;

    fn then_with(&self, rhs: &Reducer<E, T, U>, allow_backtrack: bool) -> Parser<E, U> {
        Parser::new(Sequence::new(self.clone(), rhs.clone(), allow_backtrack))
    }
}

impl<E: 'static, T: Data, U: Data> Reduce<E, T, U> for Sequence<Recognizer<E>, Reducer<E, T, U>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<U> {
        let start = stream.offset();
        if !self.left.recognize(env, stream)? {
            return Ok(None);
        }
        let Some(value) = self.right.parse(env, stream, left)? else {
            self.right_failed(stream, start)?;
            return Ok(None);
        };
        Ok(Some(value))
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.recognize_both(
            stream,
            |s| self.left.recognize(env, s),
            |s| self.right.recognize(env, s),
        )
    }

    fn print(&self, env: &E, value: &U) -> Outcome<PartialCst<T>> {
        let Some(right) = self.right.print(env, value)? else {
            return Ok(None);
        };
        Ok(Some(right.map_tree(|tree| self.left.print(env).then(tree))))
    }
}

impl<E: 'static, T: Data, U: Data> Then<Reducer<E, T, U>> for Recognizer<E> {
    type Output = Reducer<E, T, U>;

    fn then_with(&self, rhs: &Reducer<E, T, U>, allow_backtrack: bool) -> Reducer<E, T, U> {
        Reducer::new(Sequence::new(self.clone(), rhs.clone(), allow_backtrack))
    }
}

impl<E: 'static, T: Data, U: Data> Reduce<E, T, U> for Sequence<Reducer<E, T, U>, Recognizer<E>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<U> {
        let start = stream.offset();
        let Some(value) = self.left.parse(env, stream, left)? else {
            return Ok(None);
        };
        if !self.right.recognize(env, stream)? {
            self.right_failed(stream, start)?;
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.recognize_both(
            stream,
            |s| self.left.recognize(env, s),
            |s| self.right.recognize(env, s),
        )
    }

    fn print(&self, env: &E, value: &U) -> Outcome<PartialCst<T>> {
        let Some(left) = self.left.print(env, value)? else {
            return Ok(None);
        };
        Ok(Some(left.map_tree(|tree| tree.then(self.right.print(env)))))
    }
}

impl<E: 'static, T: Data, U: Data> Then<Recognizer<E>> for Reducer<E, T, U> {
    type Output = Reducer<E, T, U>;

    fn then_with(&self, rhs: &Recognizer<E>, allow_backtrack: bool) -> Reducer<E, T, U> {
        Reducer::new(Sequence::new(self.clone(), rhs.clone(), allow_backtrack))
    }
}

impl<E: 'static, T: Data, U: Data, V: Data> Reduce<E, T, V>
    for Sequence<Reducer<E, T, U>, Reducer<E, U, V>>
{
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<V> {
        let start = stream.offset();
        let Some(middle) = self.left.parse(env, stream, left)? else {
            return Ok(None);
        };
        let Some(value) = self.right.parse(env, stream, &middle)? else {
            self.right_failed(stream, start)?;
            return Ok(None);
        };
        Ok(Some(value))
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.recognize_both(
            stream,
            |s| self.left.recognize(env, s),
            |s| self.right.recognize(env, s),
        )
    }

    fn print(&self, env: &E, value: &V) -> Outcome<PartialCst<T>> {
        let Some(right) = self.right.print(env, value)? else {
            return Ok(None);
        };
        let Some(left) = self.left.print(env, &right.left)? else {
            return Ok(None);
        };
        Ok(Some(PartialCst::new(left.left, left.tree.then(right.tree))))
    }
}

impl<E: 'static, T: Data, U: Data, V: Data> Then<Reducer<E, U, V>> for Reducer<E, T, U> {
    type Output = Reducer<E, T, V>;

    fn then_with(&self, rhs: &Reducer<E, U, V>, allow_backtrack: bool) -> Reducer<E, T, V> {
        Reducer::new(Sequence::new(self.clone(), rhs.clone(), allow_backtrack))
    }
}
