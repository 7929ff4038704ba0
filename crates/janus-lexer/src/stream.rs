//! Backtracking token stream over a source string.

use rowan::{TextRange, TextSize};

use crate::lexer::{Lexer, LongestMatch};
use crate::{Error, Result, TokenId};

/// Zero-copy token: id + span, text retrieved via [`TokenStream::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(id: TokenId, span: TextRange) -> Self {
        Self { id, span }
    }
}

/// Runtime limits for a single stream.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum token attempts (default: 1,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum nesting of grammar references (default: 100).
    ///
    /// Every level costs several combinator frames, so the default keeps a
    /// 2 MiB thread stack clear of overflow on typical grammars.
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            recursion_limit: 100,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

fn text_size(offset: usize) -> TextSize {
    TextSize::from(offset as u32)
}

/// Position-addressable token input.
///
/// The stream itself holds only an offset; everything else is recomputed from
/// the lexer, so restoring a saved offset is all backtracking needs.
pub struct TokenStream<'s> {
    lexer: &'s Lexer,
    source: &'s str,
    offset: usize,
    /// Largest offset any accepted token reached; used for error positions.
    furthest: usize,
    limits: FuelLimits,
    exec_fuel: u32,
    depth: u32,
    /// Last non-exclusive match, keyed by its start offset.
    cache: Option<(usize, Option<LongestMatch>)>,
}

impl<'s> TokenStream<'s> {
    pub fn new(lexer: &'s Lexer, source: &'s str) -> Self {
        let limits = FuelLimits::default();
        Self {
            lexer,
            source,
            offset: 0,
            furthest: 0,
            limits,
            exec_fuel: limits.exec_fuel,
            depth: 0,
            cache: None,
        }
    }

    pub fn with_limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self.exec_fuel = limits.exec_fuel;
        self
    }

    #[inline]
    pub fn source(&self) -> &'s str {
        self.source
    }

    #[inline]
    pub fn lexer(&self) -> &'s Lexer {
        self.lexer
    }

    #[inline]
    pub fn offset(&self) -> TextSize {
        text_size(self.offset)
    }

    /// Restore a previously saved offset.
    pub fn set_offset(&mut self, offset: TextSize) {
        let offset = usize::from(offset);
        assert!(
            offset <= self.source.len(),
            "set_offset: {offset} is past the end of the source ({})",
            self.source.len()
        );
        self.offset = offset;
    }

    /// Furthest offset any accepted token reached.
    #[inline]
    pub fn furthest_offset(&self) -> TextSize {
        text_size(self.furthest)
    }

    /// Fuel spent so far.
    pub fn exec_fuel_consumed(&self) -> u32 {
        self.limits.exec_fuel.saturating_sub(self.exec_fuel)
    }

    /// Retrieves the text slice for a token. O(1) slice into source.
    #[inline]
    pub fn text(&self, token: &Token) -> &'s str {
        &self.source[std::ops::Range::<usize>::from(token.span)]
    }

    /// Whether only trivia remains.
    pub fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.skip_trivia()? == self.source.len())
    }

    /// Offset of the next non-trivia input. Does not move the stream.
    pub fn next_offset(&mut self) -> Result<TextSize> {
        Ok(text_size(self.skip_trivia()?))
    }

    /// Try to consume `token` at the current offset.
    ///
    /// Non-exclusive tokens must be among the tokens of the longest match at
    /// this offset. Exclusive tokens are matched with their own pattern only,
    /// ignoring every other pattern. On mismatch the stream does not move.
    pub fn accept(&mut self, token: TokenId, exclusive: bool) -> Result<Option<Token>> {
        self.consume_exec_fuel()?;

        let start = self.skip_trivia()?;

        if token.is_eof() {
            if start != self.source.len() {
                return Ok(None);
            }
            return Ok(Some(self.commit(token, start, start)));
        }

        let end = if exclusive {
            self.lexer
                .longest_match(self.source, start, Some(token))?
                .map(|m| m.end)
        } else {
            self.longest_match(start)?
                .filter(|m| m.contains(token))
                .map(|m| m.end)
        };

        let Some(end) = end else {
            log::trace!("token {token:?} rejected at {start}");
            return Ok(None);
        };
        Ok(Some(self.commit(token, start, end)))
    }

    fn commit(&mut self, id: TokenId, start: usize, end: usize) -> Token {
        log::trace!("token {id:?} accepted at {start}..{end}");
        self.offset = end;
        self.furthest = self.furthest.max(end);
        Token::new(id, TextRange::new(text_size(start), text_size(end)))
    }

    /// Offset after the trivia following the current offset. Does not move the stream.
    fn skip_trivia(&mut self) -> Result<usize> {
        let mut pos = self.offset;
        while let Some(m) = self.longest_match(pos)? {
            if !self.lexer.is_trivia(&m) {
                break;
            }
            pos = m.end;
        }
        Ok(pos)
    }

    fn longest_match(&mut self, at: usize) -> Result<Option<LongestMatch>> {
        if let Some((cached_at, m)) = &self.cache {
            if *cached_at == at {
                return Ok(m.clone());
            }
        }
        let m = self.lexer.longest_match(self.source, at, None)?;
        self.cache = Some((at, m.clone()));
        Ok(m)
    }

    fn consume_exec_fuel(&mut self) -> Result<()> {
        if self.exec_fuel == 0 {
            return Err(Error::ExecFuelExhausted);
        }
        self.exec_fuel -= 1;
        Ok(())
    }

    /// Account for entering a grammar reference.
    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= self.limits.recursion_limit {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        Ok(())
    }

    /// Account for leaving a grammar reference.
    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "exit without matching enter");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current reference nesting depth.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }
}
