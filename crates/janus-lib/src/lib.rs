//! Janus: invertible grammar combinators.
//!
//! One grammar description is both a parser (text to value) and a
//! pretty-printer (value to text). Three roles compose:
//! - [`Recognizer`] - matches input, produces nothing, prints canonical text
//! - [`Parser`] - matches input and produces a value
//! - [`Reducer`] - matches input and folds a value into an accumulator
//!
//! Printing walks the same combinator tree backwards: [`Fold`] and [`Mapping`]
//! inverses decompose a finished value into the pieces that produced it.
//!
//! # Example
//!
//! ```
//! use janus::prelude::*;
//! use janus::utils::list::{ConsFold, EmptyList};
//!
//! let mut tokenizer = Tokenizer::new();
//! let num = Parser::<(), i64>::from_token(
//!     tokenizer.add_regex("[0-9]+").unwrap(),
//!     false,
//!     janus::mapping::from_fn(
//!         |_, _, text: &String| Ok(text.parse().unwrap_or_default()),
//!         |_, n: &i64| Ok(Some(n.to_string())),
//!     ),
//! );
//! let comma = Recognizer::from_string(",", &mut tokenizer, false).unwrap();
//! let cons = num.fold(ConsFold::new(0));
//! let list = EmptyList::parser::<(), i64>().then(&comma.join(&cons));
//! let lexer = tokenizer.build().unwrap();
//!
//! let value = list.parse_source(&(), &lexer, "1,2,3").unwrap();
//! assert_eq!(value, vec![1, 2, 3]);
//! assert_eq!(list.print_source(&(), &value).unwrap(), "1,2,3");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cst;
pub mod diagnostics;
pub mod fold;
pub mod grammar;
pub mod mapping;
pub mod utils;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

pub use cst::{Category, Cst, LayoutPrinter, PartialCst, StringPrinter};
pub use diagnostics::ErrorPrinter;
pub use fold::Fold;
pub use grammar::{Or, Parse, Parser, Recognize, Recognizer, Reduce, Reducer, Ref, Then};
pub use mapping::Mapping;

pub use janus_lexer::{
    FuelLimits, Lexer, Pattern, TextRange, TextSize, Token, TokenId, TokenStream, Tokenizer,
};

/// Everything needed to write a grammar.
pub mod prelude {
    pub use crate::{
        Category, Cst, Data, Fold, Mapping, Or, Outcome, Parser, Recognizer, Reducer, Ref, Then,
    };
    pub use janus_lexer::{Lexer, Pattern, TokenId, TokenStream, Tokenizer};
}

/// Values threaded through grammars.
///
/// Values are shared between backtracking branches, so they are cloned rather
/// than mutated. Wrap large nodes in `Arc` to keep clones cheap.
pub trait Data: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Data for T {}

/// Errors that can occur while building, parsing or printing.
///
/// An ordinary non-match is not an error: it is `Ok(None)` / `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lexer(#[from] janus_lexer::Error),

    /// The second half of a non-backtracking sequence failed after the first half matched.
    #[error("expected {expected}")]
    UnexpectedInput { offset: TextSize, expected: String },

    /// The grammar did not match at the start of the input.
    #[error("no match for {expected}")]
    NoMatch { offset: TextSize, expected: String },

    /// The grammar matched a prefix of the input.
    #[error("unexpected trailing input")]
    TrailingInput { offset: TextSize },

    #[error("type `{type_name}` has no field `{field}`")]
    UnknownField {
        type_name: String,
        field: String,
    },

    #[error("field `{field}` of `{type_name}` holds {found}, expected {expected}")]
    FieldTypeMismatch {
        type_name: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("reference `{0}` is used before it is defined")]
    UndefinedRef(String),

    #[error("reference `{0}` is already defined")]
    RefAlreadyDefined(String),

    #[error("value cannot be printed by {0}")]
    NotPrintable(String),

    /// A mapping or fold received a value outside its domain.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl Error {
    /// Source range of syntax errors.
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::UnexpectedInput { offset, .. }
            | Self::NoMatch { offset, .. }
            | Self::TrailingInput { offset } => Some(TextRange::empty(*offset)),
            _ => None,
        }
    }

    /// Whether this error describes malformed input rather than a malformed grammar or value.
    pub fn is_syntax_error(&self) -> bool {
        self.range().is_some()
    }

    pub fn printer(&self) -> ErrorPrinter<'_, '_> {
        ErrorPrinter::new(self)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Result of a combinator that may not match: `Ok(None)` is an ordinary non-match.
pub type Outcome<T> = Result<Option<T>>;
