//! Runtime tokenizer and backtracking token stream.
//!
//! Grammars register literals and regular expressions while they are being
//! built and keep the returned [`TokenId`]s. Once registration is done, the
//! [`Tokenizer`] compiles every pattern into one multi-pattern DFA ([`Lexer`]).
//! A [`TokenStream`] walks a source string with that lexer:
//! - `offset` / `set_offset` for backtracking
//! - `accept(token, exclusive)` to try a single token at the current offset
//! - skipped tokens (whitespace, comments) are consumed before every attempt
//!
//! A failed `accept` never moves the stream.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod lexer;
mod stream;
mod tokenizer;


pub use lexer::{Lexer, LongestMatch};
pub use stream::{FuelLimits, Token, TokenStream};
pub use tokenizer::{Pattern, Tokenizer};

pub use rowan::{TextRange, TextSize};

/// Stable identifier of a registered pattern.
///
/// Ids are assigned in registration order, starting at 0.
/// [`TokenId::EOF`] is a sentinel that is never assigned to a pattern.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TokenId(u32);

impl TokenId {
    /// Matches once only skipped tokens remain in the input.
    pub const EOF: TokenId = TokenId(u32::MAX);

    /// Raw index for debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_eof(self) -> bool {
        self == Self::EOF
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors raised while registering patterns, compiling the lexer, or matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to compile lexer: {0}")]
    Build(String),

    #[error("token {0:?} is not registered with this lexer")]
    UnknownToken(TokenId),

    #[error("lexer search failed: {0}")]
    Search(String),

    /// Execution fuel exhausted (too many token attempts).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (grammar references nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;
