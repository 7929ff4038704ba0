//! Separator-delimited repetition (`a, b, c`).

use std::fmt;

use janus_lexer::TokenStream;

use super::{Recognizer, Reduce, Reducer, restore};
use crate::cst::{Cst, PartialCst};
use crate::{Data, Outcome, Result};

pub(super) struct Join<E, T> {
    separator: Recognizer<E>,
    element: Reducer<E, T, T>,
    non_empty: bool,
}

impl<E, T> Join<E, T> {
    pub(super) fn new(separator: Recognizer<E>, element: Reducer<E, T, T>, non_empty: bool) -> Self {
        Self {
            separator,
            element,
            non_empty,
        }
    }
}

impl<E: 'static, T: Data> Join<E, T> {
    /// Matches `separator element` pairs after the first element. A separator
    /// without an element after it is given back.
    fn recognize_tail(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<()> {
        loop {
            let start = stream.offset();
            if !self.separator.recognize(env, stream)? {
                return Ok(());
            }
            if !self.element.recognize(env, stream)? {
                restore(stream, start);
                return Ok(());
            }
        }
    }
}

impl<E: 'static, T: Data> Reduce<E, T, T> for Join<E, T> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>, left: &T) -> Outcome<T> {
        let Some(mut acc) = self.element.parse(env, stream, left)? else {
            return Ok((!self.non_empty).then(|| left.clone()));
        };
        loop {
            let start = stream.offset();
            if !self.separator.recognize(env, stream)? {
                break;
            }
            let Some(next) = self.element.parse(env, stream, &acc)? else {
                restore(stream, start);
                break;
            };
            acc = next;
        }
        Ok(Some(acc))
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        if !self.element.recognize(env, stream)? {
            return Ok(!self.non_empty);
        }
        self.recognize_tail(env, stream)?;
        Ok(true)
    }

    fn print(&self, env: &E, value: &T) -> Outcome<PartialCst<T>> {
        let mut trees = Vec::new();
        let mut acc = value.clone();
        while let Some(partial) = self.element.print(env, &acc)? {
            trees.push(partial.tree);
            acc = partial.left;
        }
        if trees.is_empty() && self.non_empty {
            return Ok(None);
        }

        let separator = self.separator.print(env);
        let mut parts = Vec::with_capacity(trees.len() * 2);
        for (i, element) in trees.into_iter().rev().enumerate() {
            if i > 0 {
                parts.push(separator.clone());
            }
            parts.push(element);
        }
        Ok(Some(PartialCst::new(acc, Cst::concat(parts))))
    }
}

impl<E, T> fmt::Display for Join<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.non_empty { "+" } else { "*" };
        write!(f, "{{{} / {}}}{suffix}", self.element, self.separator)
    }
}
