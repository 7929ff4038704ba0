//! Compiled lexer: every registered pattern in one DFA.
//!
//! The DFA is built with `MatchKind::All` so a match state reports every
//! pattern that matches at that length, and with a start state per pattern so
//! exclusive tokens can be tried in isolation.

use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::{Anchored, Input, MatchKind, PatternID};

use crate::tokenizer::Pattern;
use crate::{Error, Result, TokenId};

/// Longest non-empty match at an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestMatch {
    /// Byte offset one past the match.
    pub end: usize,
    /// Every token matching exactly up to `end`, in registration order.
    pub tokens: Vec<TokenId>,
}

impl LongestMatch {
    #[inline]
    pub fn contains(&self, token: TokenId) -> bool {
        self.tokens.contains(&token)
    }
}

#[derive(Debug, Clone)]
pub struct Lexer {
    dfa: dense::DFA<Vec<u32>>,
    patterns: Vec<Pattern>,
    /// Indexed by token id.
    skipped: Vec<bool>,
}

impl Lexer {
    pub(crate) fn compile(patterns: Vec<Pattern>, skipped: Vec<bool>) -> Result<Self> {
        let sources: Vec<String> = patterns.iter().map(Pattern::to_regex).collect();

        let dfa = dense::Builder::new()
            .configure(
                dense::Config::new()
                    .match_kind(MatchKind::All)
                    .start_kind(StartKind::Anchored)
                    .starts_for_each_pattern(true),
            )
            .build_many(&sources)
            .map_err(|e| Error::Build(e.to_string()))?;

        log::debug!(
            "compiled lexer: {} patterns, {} bytes",
            patterns.len(),
            dfa.memory_usage()
        );

        Ok(Self {
            dfa,
            patterns,
            skipped,
        })
    }

    /// Number of patterns compiled into this lexer.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn pattern(&self, id: TokenId) -> Option<&Pattern> {
        self.patterns.get(id.index())
    }

    pub fn is_skipped(&self, id: TokenId) -> bool {
        self.skipped.get(id.index()).copied().unwrap_or(false)
    }

    /// Whether any token of `m` is trivia.
    pub(crate) fn is_trivia(&self, m: &LongestMatch) -> bool {
        m.tokens.iter().any(|&id| self.is_skipped(id))
    }

    /// Find the longest non-empty match starting exactly at `at`.
    ///
    /// With `only`, the search is restricted to that token's pattern.
    pub fn longest_match(
        &self,
        source: &str,
        at: usize,
        only: Option<TokenId>,
    ) -> Result<Option<LongestMatch>> {
        let anchored = match only {
            Some(id) if id.index() >= self.patterns.len() => {
                return Err(Error::UnknownToken(id));
            }
            Some(id) => Anchored::Pattern(PatternID::must(id.index())),
            None => Anchored::Yes,
        };

        let input = Input::new(source).span(at..source.len()).anchored(anchored);
        let mut state = self
            .dfa
            .start_state_forward(&input)
            .map_err(|e| Error::Search(e.to_string()))?;

        // Match states are delayed by one byte: entering a match state after
        // byte `i` means a match ended right before it.
        let mut last = None;
        let mut reached_end = true;
        for (i, &byte) in source.as_bytes()[at..].iter().enumerate() {
            state = self.dfa.next_state(state, byte);
            if !self.dfa.is_special_state(state) {
                continue;
            }
            if self.dfa.is_match_state(state) {
                last = Some((at + i, state));
            } else if self.dfa.is_dead_state(state) || self.dfa.is_quit_state(state) {
                reached_end = false;
                break;
            }
        }
        if reached_end {
            state = self.dfa.next_eoi_state(state);
            if self.dfa.is_match_state(state) {
                last = Some((source.len(), state));
            }
        }

        let Some((end, state)) = last else {
            return Ok(None);
        };
        if end == at {
            return Ok(None);
        }

        let mut tokens: Vec<TokenId> = (0..self.dfa.match_len(state))
            .map(|i| TokenId::from_index(self.dfa.match_pattern(state, i).as_usize()))
            .collect();
        tokens.sort_unstable();
        Ok(Some(LongestMatch { end, tokens }))
    }
}
