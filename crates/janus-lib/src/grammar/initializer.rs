use std::fmt;

use janus_lexer::TokenStream;

use super::Parse;
use crate::cst::Cst;
use crate::{Data, Outcome};

/// Produces a constant without consuming input.
///
/// Prints an empty tree for exactly that constant and nothing else, so an
/// initializer at the start of a sequence pins down where printing stops.
pub struct Initializer<T> {
    value: T,
}

impl<T> Initializer<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<E, T: Data + PartialEq> Parse<E, T> for Initializer<T> {
    fn parse(&self, _env: &E, _stream: &mut TokenStream<'_>) -> Outcome<T> {
        Ok(Some(self.value.clone()))
    }

    fn print(&self, _env: &E, value: &T) -> Outcome<Cst> {
        Ok((*value == self.value).then(Cst::empty))
    }
}

impl<T> fmt::Display for Initializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("init")
    }
}
