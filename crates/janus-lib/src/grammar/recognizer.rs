use std::fmt;
use std::sync::Arc;

use janus_lexer::{TokenId, TokenStream, Tokenizer};

use super::{Reducer, Then};
use super::annotation::Annotated;
use super::join::Join;
use super::repeat::{Optional, Repeat};
use super::token::TokenRecognizer;
use crate::cst::{Category, Cst};
use crate::{Data, Result};

/// A combinator that consumes input without producing a value.
pub trait Recognize<E>: fmt::Display + Send + Sync {
    /// Try to match at the current position. On `Ok(false)` the stream has not moved.
    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool>;

    /// Canonical text. Recognizers carry no payload, so this ignores what the
    /// source originally contained.
    fn print(&self, env: &E) -> Cst;
}

/// Shared handle to a recognizer node.
pub struct Recognizer<E>(Arc<dyn Recognize<E>>);

impl<E> Clone for Recognizer<E> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<E: 'static> Recognizer<E> {
    pub fn new(node: impl Recognize<E> + 'static) -> Self {
        Self(Arc::new(node))
    }

    /// Register `text` as a literal token and recognize it.
    pub fn from_string(text: &str, tokenizer: &mut Tokenizer, exclusive: bool) -> Result<Self> {
        let id = tokenizer.add_text(text)?;
        Ok(Self::from_token(id, exclusive, text))
    }

    /// Recognize an already registered token; `text` is what printing emits.
    pub fn from_token(id: TokenId, exclusive: bool, text: impl Into<String>) -> Self {
        Self::new(TokenRecognizer::new(id, exclusive, text.into()))
    }

    /// Matches once only skipped tokens remain.
    pub fn eof() -> Self {
        Self::from_token(TokenId::EOF, false, "")
    }

    #[inline]
    pub fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.0.recognize(env, stream)
    }

    #[inline]
    pub fn print(&self, env: &E) -> Cst {
        self.0.print(env)
    }

    /// Zero or more, greedy. Prints nothing.
    pub fn rep(&self) -> Self {
        Self::new(Repeat::new(self.clone()))
    }

    /// One or more. Prints a single occurrence.
    pub fn plus(&self) -> Self {
        self.then(&self.rep())
    }

    /// Zero or one. Prints its text only with `always_print`.
    pub fn opt(&self, always_print: bool) -> Self {
        Self::new(Optional::new(self.clone(), always_print))
    }

    /// Zero or more `element`s separated by `self`.
    pub fn join<T: Data>(&self, element: &Reducer<E, T, T>) -> Reducer<E, T, T> {
        Reducer::new(Join::new(self.clone(), element.clone(), false))
    }

    /// One or more `element`s separated by `self`.
    pub fn join_plus<T: Data>(&self, element: &Reducer<E, T, T>) -> Reducer<E, T, T> {
        Reducer::new(Join::new(self.clone(), element.clone(), true))
    }

    /// Tag the printed tree with `category`. Parsing is unaffected.
    pub fn annotate(&self, category: Category) -> Self {
        Self::new(Annotated::new(self.clone(), category))
    }
}

impl<E> fmt::Display for Recognizer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<E> fmt::Debug for Recognizer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Recognizer({self})")
    }
}
