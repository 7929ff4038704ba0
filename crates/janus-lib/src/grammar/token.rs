//! Leaf combinators bound to a single token.

use std::fmt;
use std::sync::Arc;

use janus_lexer::{TokenId, TokenStream};

use super::{Parse, Recognize};
use crate::cst::Cst;
use crate::mapping::Mapping;
use crate::{Data, Outcome, Result};

pub(super) struct TokenRecognizer {
    id: TokenId,
    exclusive: bool,
    text: String,
}

impl TokenRecognizer {
    pub(super) fn new(id: TokenId, exclusive: bool, text: String) -> Self {
        Self {
            id,
            exclusive,
            text,
        }
    }
}

impl<E> Recognize<E> for TokenRecognizer {
    fn recognize(&self, _env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        Ok(stream.accept(self.id, self.exclusive)?.is_some())
    }

    fn print(&self, _env: &E) -> Cst {
        if self.text.is_empty() {
            return Cst::empty();
        }
        Cst::text(&self.text)
    }
}

impl fmt::Display for TokenRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_eof() {
            return f.write_str("end of input");
        }
        write!(f, "'{}'", self.text)
    }
}

pub(super) struct TokenParser<E, T> {
    id: TokenId,
    exclusive: bool,
    mapping: Arc<dyn Mapping<E, String, T>>,
    label: Option<String>,
}

impl<E, T> TokenParser<E, T> {
    pub(super) fn new(
        id: TokenId,
        exclusive: bool,
        mapping: impl Mapping<E, String, T> + 'static,
        label: Option<String>,
    ) -> Self {
        Self {
            id,
            exclusive,
            mapping: Arc::new(mapping),
            label,
        }
    }
}

impl<E, T: Data> Parse<E, T> for TokenParser<E, T> {
    fn parse(&self, env: &E, stream: &mut TokenStream<'_>) -> Outcome<T> {
        let Some(token) = stream.accept(self.id, self.exclusive)? else {
            return Ok(None);
        };
        let text = stream.text(&token).to_owned();
        self.mapping.parse(env, stream, &text).map(Some)
    }

    fn recognize(&self, _env: &E, stream: &mut TokenStream<'_>) -> Result<bool> {
        Ok(stream.accept(self.id, self.exclusive)?.is_some())
    }

    fn print(&self, env: &E, value: &T) -> Outcome<Cst> {
        Ok(self.mapping.left(env, value)?.map(|text| Cst::text(&text)))
    }
}

impl<E, T> fmt::Display for TokenParser<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => f.write_str(label),
            None => write!(f, "token {}", self.id.as_u32()),
        }
    }
}
