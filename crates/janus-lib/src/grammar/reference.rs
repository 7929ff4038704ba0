//! Late-bound parsers for recursive grammars.

use std::fmt;
use std::sync::{Arc, OnceLock};

use janus_lexer::TokenStream;

use super::{Parse, Parser};
use crate::cst::Cst;
use crate::{Data, Error, Outcome, Result};

/// A named placeholder that can be used before the parser it stands for exists.
///
/// ```
/// use janus::prelude::*;
///
/// let mut tokenizer = Tokenizer::new();
/// let open = Recognizer::<()>::from_string("(", &mut tokenizer, false).unwrap();
/// let close = Recognizer::from_string(")", &mut tokenizer, false).unwrap();
///
/// // nested := '(' nested ')' | init
/// let nested = Ref::<(), ()>::new("nested");
/// let parens = open.then(&nested.parser()).then(&close);
/// nested.define(&parens.or(&Parser::initializer(()))).unwrap();
///
/// let lexer = tokenizer.build().unwrap();
/// assert!(nested.parser().parse_source(&(), &lexer, "((()))").is_ok());
/// ```
///
/// Parsing counts reference nesting against the stream's recursion limit.
/// Printing walks the value instead and is not bounded: a value nested deeper
/// than the thread stack allows overflows it.
///
/// A defined reference and its target point at each other, so a recursive
/// grammar lives until the end of the program.
pub struct Ref<E, T> {
    inner: Arc<RefInner<E, T>>,
}

struct RefInner<E, T> {
    name: String,
    target: OnceLock<Parser<E, T>>,
}

impl<E, T> Clone for Ref<E, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: 'static, T: Data> Ref<E, T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RefInner {
                name: name.into(),
                target: OnceLock::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Bind the reference. A reference can be defined once.
    pub fn define(&self, parser: &Parser<E, T>) -> Result<()> {
        self.inner
            .target
            .set(parser.clone())
            .map_err(|_| Error::RefAlreadyDefined(self.inner.name.clone()))?;
        log::debug!("defined reference `{}` as {parser}", self.inner.name);
        Ok(())
    }

    pub fn is_defined(&self) -> bool {
        self.inner.target.get().is_some()
    }

    /// Parser that forwards to the definition, whenever it is made.
    pub fn parser(&self) -> Parser<E, T> {
        Parser::new(RefParser {
            inner: Arc::clone(&self.inner),
        })
    }
}

struct RefParser<E, T> {
    inner: Arc<RefInner<E, T>>,
}

impl<E, T> RefParser<E, T> {
    fn target(&self) -> Result<&Parser<E, T>> {
        self.inner
            .target
            .get()
            .ok_or_else(|| Error::UndefinedRef(self.inner.name.clone()))
    }
}

impl<E: 'static, T: Data> Parse<E, T> for RefParser<E, T> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<T> {
        let target = self.target()?;
        stream.enter()?;
        let outcome = target.parse(env, stream);
        stream.exit();
        outcome
    }

    fn recognize(&self, env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        let target = self.target()?;
        stream.enter()?;
        let matched = target.recognize(env, stream);
        stream.exit();
        matched
    }

    fn print(&self, env: &E, value: &T) -> Outcome<Cst> {
        self.target()?.print(env, value)
    }
}

impl<E, T> fmt::Display for RefParser<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

impl<E, T> fmt::Debug for Ref<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref")
            .field("name", &self.inner.name)
            .field("defined", &self.inner.target.get().is_some())
            .finish()
    }
}
