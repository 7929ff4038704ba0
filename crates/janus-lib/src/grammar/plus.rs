//! Repetition with a minimum count.
//!
//! For `min` occurrences of `r` the node keeps two compositions:
//! - parsing: `r r .. r` (`min` times), then `r*`
//! - printing: `r*`, then `r r .. r`
//!
//! Printing peels elements off the right end of the accumulator, so the
//! outermost layer to peel is the optional tail. With the parsing order, `r*`
//! would peel every element before the mandatory part gets to print, and any
//! value with more than `min` elements would be unprintable.

use std::fmt;
use std::num::NonZeroUsize;

use janus_lexer::TokenStream;

use super::{Reduce, Reducer, Then};
use crate::cst::PartialCst;
use crate::{Data, Outcome, Result};

pub(super) struct Plus<E, T> {
    element: Reducer<E, T, T>,
    min: NonZeroUsize,
    parser: Reducer<E, T, T>,
    printer: Reducer<E, T, T>,
}

impl<E: 'static, T: Data> Plus<E, T> {
    pub(super) fn new(element: Reducer<E, T, T>, min: NonZeroUsize) -> Self {
        // Fewer than `min` occurrences is a plain non-match, so the mandatory
        // part may backtrack.
        let mut sequence = element.clone();
        for _ in 1..min.get() {
            sequence = sequence.then_with(&element, true);
        }

        let tail = element.rep();
        let parser = sequence.then_with(&tail, true);
        let printer = tail.then_with(&sequence, true);

        log::debug!("built repetition {element} with minimum {min}");

        Self {
            element,
            min,
            parser,
            printer,
        }
    }
}

impl<E: 'static, T: Data> Reduce<E, T, T> for Plus<E, T> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<T> {
        self.parser.parse(env, stream, left)
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.parser.recognize(env, stream)
    }

    fn print(&self, env: &E, value: &T) -> Outcome<PartialCst<T>> {
        self.printer.print(env, value)
    }
}

impl<E, T> fmt::Display for Plus<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.min.get() {
            1 => write!(f, "{{{}}}+", self.element),
            min => write!(f, "{{{}}}{{{min},}}", self.element),
        }
    }
}
