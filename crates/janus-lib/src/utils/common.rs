use janus_lexer::TokenStream;

use crate::mapping::Mapping;
use crate::{Error, Outcome, Result};

/// Counts occurrences: adds one while parsing, subtracts one while printing.
///
/// Printing stops at `min`, so `counter.rep()` prints `n - min` occurrences
/// for a count of `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntIncrementor {
    min: i64,
}

impl IntIncrementor {
    pub fn new(min: i64) -> Self {
        Self { min }
    }
}

impl<E> Mapping<E, i64, i64> for IntIncrementor {
    fn parse(&self, _env: &E, _stream: &TokenStream<'_>, input: &i64) -> Result<i64> {
        input
            .checked_add(1)
            .ok_or_else(|| Error::InvalidValue(format!("counter overflow at {input}")))
    }

    fn left(&self, _env: &E, result: &i64) -> Outcome<i64> {
        Ok((*result > self.min).then(|| result - 1))
    }
}
