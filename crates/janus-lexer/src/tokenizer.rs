//! Pattern registration.
//!
//! Identical patterns are deduplicated, so registering the same literal twice
//! returns the same id. Ids are indices into an insertion-ordered set.

use std::fmt;

use indexmap::IndexSet;

use crate::lexer::Lexer;
use crate::{Error, Result, TokenId};

/// A token pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Literal text, matched verbatim.
    Text(String),
    /// Regular expression in `regex-syntax` dialect.
    Regex(String),
}

impl Pattern {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn regex(source: impl Into<String>) -> Self {
        Self::Regex(source.into())
    }

    /// Regex source handed to the DFA builder.
    pub(crate) fn to_regex(&self) -> String {
        match self {
            Self::Text(text) => regex_syntax::escape(text),
            Self::Regex(source) => source.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        let Self::Regex(source) = self else {
            return Ok(());
        };

        regex_syntax::Parser::new()
            .parse(source)
            .map(|_| ())
            .map_err(|e| Error::InvalidPattern {
                pattern: source.clone(),
                message: e.to_string(),
            })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "'{text}'"),
            Self::Regex(source) => write!(f, "/{source}/"),
        }
    }
}

/// Collects patterns during grammar construction.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    patterns: IndexSet<Pattern>,
    skipped: Vec<TokenId>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern, returning its id.
    /// If the pattern was already registered, returns the existing id.
    pub fn add(&mut self, pattern: Pattern) -> Result<TokenId> {
        if let Some(index) = self.patterns.get_index_of(&pattern) {
            return Ok(TokenId::from_index(index));
        }

        pattern.validate()?;

        let (index, _) = self.patterns.insert_full(pattern);
        let id = TokenId::from_index(index);
        log::debug!("registered token {:?} for {}", id, self.patterns[index]);
        Ok(id)
    }

    pub fn add_text(&mut self, text: &str) -> Result<TokenId> {
        self.add(Pattern::text(text))
    }

    pub fn add_regex(&mut self, source: &str) -> Result<TokenId> {
        self.add(Pattern::regex(source))
    }

    /// Mark a token as trivia. Streams consume trivia before every token attempt.
    pub fn skip(&mut self, id: TokenId) -> Result<()> {
        if id.index() >= self.patterns.len() {
            return Err(Error::UnknownToken(id));
        }
        if !self.skipped.contains(&id) {
            self.skipped.push(id);
        }
        Ok(())
    }

    /// Look up the pattern registered under `id`.
    pub fn pattern(&self, id: TokenId) -> Option<&Pattern> {
        self.patterns.get_index(id.index())
    }

    /// Number of registered patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Compile every registered pattern into a lexer.
    pub fn build(&self) -> Result<Lexer> {
        let patterns: Vec<Pattern> = self.patterns.iter().cloned().collect();
        let mut skipped = vec![false; patterns.len()];
        for id in &self.skipped {
            skipped[id.index()] = true;
        }
        Lexer::compile(patterns, skipped)
    }
}
