//! Repetition and optionality.

use std::fmt;

use janus_lexer::TokenStream;

use super::{Recognize, Recognizer, Reduce, Reducer};
use crate::cst::{Cst, PartialCst};
use crate::{Data, Outcome, Result};

/// Zero or more, greedy.
pub(super) struct Repeat<X> {
    element: X,
}

impl<X> Repeat<X> {
    pub(super) fn new(element: X) -> Self {
        Self { element }
    }
}

impl<X: fmt::Display> fmt::Display for Repeat<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}*", self.element)
    }
}

/// Shared recognize loop. Stops on the first non-match or on a match that
/// consumed nothing.
fn recognize_all(
    stream: &mut TokenStream<'_>,
    mut element: impl FnMut(&mut TokenStream<'_>) -> Result<bool>,
) -> Result<bool> {
    loop {
        let start = stream.offset();
        if !element(stream)? || stream.offset() == start {
            return Ok(true);
        }
    }
}

impl<E: 'static> Recognize<E> for Repeat<Recognizer<E>> {
    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        recognize_all(stream, |s| self.element.recognize(env, s))
    }

    fn print(&self, _env: &E) -> Cst {
        Cst::empty()
    }
}

impl<E: 'static, T: Data> Reduce<E, T, T> for Repeat<Reducer<E, T, T>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<T> {
        let mut acc = left.clone();
        loop {
            let start = stream.offset();
            let Some(next) = self.element.parse(env, stream, &acc)? else {
                break;
            };
            acc = next;
            if stream.offset() == start {
                break;
            }
        }
        Ok(Some(acc))
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        recognize_all(stream, |s| self.element.recognize(env, s))
    }

    fn print(&self, env: &E, value: &T) -> Outcome<PartialCst<T>> {
        let mut trees = Vec::new();
        let mut acc = value.clone();
        while let Some(partial) = self.element.print(env, &acc)? {
            trees.push(partial.tree);
            acc = partial.left;
        }
        // Peeled last element first.
        trees.reverse();
        Ok(Some(PartialCst::new(acc, Cst::concat(trees))))
    }
}

/// Zero or one.
pub(super) struct Optional<X> {
    element: X,
    always_print: bool,
}

impl<X> Optional<X> {
    pub(super) fn new(element: X, always_print: bool) -> Self {
        Self {
            element,
            always_print,
        }
    }
}

impl<X: fmt::Display> fmt::Display for Optional<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}?", self.element)
    }
}

impl<E: 'static> Recognize<E> for Optional<Recognizer<E>> {
    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.element.recognize(env, stream)?;
        Ok(true)
    }

    fn print(&self, env: &E) -> Cst {
        if self.always_print {
            return self.element.print(env);
        }
        Cst::empty()
    }
}

impl<E: 'static, T: Data> Reduce<E, T, T> for Optional<Reducer<E, T, T>> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<T> {
        match self.element.parse(env, stream, left)? {
            Some(value) => Ok(Some(value)),
            None => Ok(Some(left.clone())),
        }
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.element.recognize(env, stream)?;
        Ok(true)
    }

    fn print(&self, env: &E, value: &T) -> Outcome<PartialCst<T>> {
        match self.element.print(env, value)? {
            Some(partial) => Ok(Some(partial)),
            None => Ok(Some(PartialCst::new(value.clone(), Cst::empty()))),
        }
    }
}
