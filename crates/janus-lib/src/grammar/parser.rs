use std::fmt;
use std::sync::Arc;

use janus_lexer::{Lexer, TokenId, TokenStream, Tokenizer};

use super::Reducer;
use super::annotation::Annotated;
use super::initializer::Initializer;
use super::lift::FoldReducer;
use super::token::TokenParser;
use crate::cst::{Category, Cst, LayoutPrinter};
use crate::fold::Fold;
use crate::mapping::Mapping;
use crate::{Data, Error, Outcome, Result};

/// A combinator that consumes input and produces a `T`.
pub trait Parse<E, T>: fmt::Display + Send + Sync {
    /// `Ok(None)` if the input does not match; the stream has not moved then.
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<T>;

    /// Match without keeping the value.
    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        Ok(self.parse(env, stream)?.is_some())
    }

    /// Tree that parses back to `value`, or `None` if this parser cannot
    /// have produced it.
    fn print(&self, env: &E, value: &T) -> Outcome<Cst>;
}

/// Shared handle to a parser node.
pub struct Parser<E, T>(Arc<dyn Parse<E, T>>);

impl<E, T> Clone for Parser<E, T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<E: 'static, T: Data> Parser<E, T> {
    pub fn new(node: impl Parse<E, T> + 'static) -> Self {
        Self(Arc::new(node))
    }

    /// Parse a registered token, converting its text with `mapping`.
    pub fn from_token(
        id: TokenId,
        exclusive: bool,
        mapping: impl Mapping<E, String, T> + 'static,
    ) -> Self {
        Self::new(TokenParser::new(id, exclusive, mapping, None))
    }

    /// Register `source` as a regex token and parse it.
    pub fn from_regex(
        source: &str,
        tokenizer: &mut Tokenizer,
        exclusive: bool,
        mapping: impl Mapping<E, String, T> + 'static,
    ) -> Result<Self> {
        let id = tokenizer.add_regex(source)?;
        let label = tokenizer.pattern(id).map(ToString::to_string);
        Ok(Self::new(TokenParser::new(id, exclusive, mapping, label)))
    }

    /// Produce `value` without consuming input. Prints only `value`.
    pub fn initializer(value: T) -> Self
    where
        T: PartialEq,
    {
        Self::new(Initializer::new(value))
    }

    #[inline]
    pub fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<T> {
        self.0.parse(env, stream)
    }

    #[inline]
    pub fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        self.0.recognize(env, stream)
    }

    #[inline]
    pub fn print(&self, env: &E, value: &T) -> Outcome<Cst> {
        self.0.print(env, value)
    }

    /// Reducer that parses a value with `self` and folds it into the accumulator.
    ///
    /// Printing splits the result with the fold's inverses and prints the
    /// right-hand side with `self`.
    pub fn fold<L: Data, R: Data>(
        &self,
        fold: impl Fold<E, L, T, R> + 'static,
    ) -> Reducer<E, L, R> {
        Reducer::new(FoldReducer::new(self.clone(), fold))
    }

    /// Tag the printed tree with `category`. Parsing is unaffected.
    pub fn annotate(&self, category: Category) -> Self {
        Self::new(Annotated::new(self.clone(), category))
    }

    /// Parse all of `source`; trailing input other than trivia is an error.
    pub fn parse_source(&self, env: &E, lexer: &Lexer, source: &str) -> Result<T> {
        let mut stream = TokenStream::new(lexer, source);
        self.parse_stream(env, &mut stream)
    }

    /// Parse the rest of `stream`; trailing input other than trivia is an error.
    pub fn parse_stream(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<T> {
        let Some(value) = self.parse(env, stream)? else {
            return Err(Error::NoMatch {
                offset: stream.furthest_offset(),
                expected: self.to_string(),
            });
        };
        if !stream.is_at_end()? {
            return Err(Error::TrailingInput {
                offset: stream.next_offset()?,
            });
        }
        Ok(value)
    }

    /// Tree for `value`, or [`Error::NotPrintable`].
    pub fn print_tree(&self, env: &E, value: &T) -> Result<Cst> {
        self.print(env, value)?
            .ok_or_else(|| Error::NotPrintable(self.to_string()))
    }

    /// Print `value` with the default layout.
    pub fn print_source(&self, env: &E, value: &T) -> Result<String> {
        Ok(self.print_tree(env, value)?.to_source())
    }

    /// Print `value` through a custom layout.
    pub fn print_with<P: LayoutPrinter + ?Sized>(
        &self,
        env: &E,
        value: &T,
        printer: &mut P,
    ) -> Result<()> {
        self.print_tree(env, value)?.print_to(printer);
        Ok(())
    }
}

impl<E, T> fmt::Display for Parser<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<E, T> fmt::Debug for Parser<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parser({self})")
    }
}
