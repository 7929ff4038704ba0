//! Right-growing lists.
//!
//! A list grammar usually starts from [`EmptyList`] (or a [`singleton`]) and
//! appends with [`ConsFold`]:
//!
//! ```text
//! EmptyList.then(comma.join(item.fold(ConsFold::new(0))))
//! ```

use std::fmt;

use janus_lexer::TokenStream;

use crate::cst::Cst;
use crate::fold::Fold;
use crate::grammar::{Parse, Parser};
use crate::mapping::Mapping;
use crate::{Data, Error, Outcome, Result};

/// Produces an empty list. Prints only empty lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyList;

impl EmptyList {
    pub fn parser<E: 'static, T: Data>() -> Parser<E, Vec<T>> {
        Parser::new(EmptyList)
    }
}

impl<E, T: Data> Parse<E, Vec<T>> for EmptyList {
    fn parse(&self, _env: &E, _stream: &mut TokenStream<'_>) -> Outcome<Vec<T>> {
        Ok(Some(Vec::new()))
    }

    fn print(&self, _env: &E, value: &Vec<T>) -> Outcome<Cst> {
        Ok(value.is_empty().then(Cst::empty))
    }
}

impl fmt::Display for EmptyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[]")
    }
}

/// Wraps a value into a one-element list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Singleton;

pub fn singleton() -> Singleton {
    Singleton
}

impl<E, T: Data> Mapping<E, T, Vec<T>> for Singleton {
    fn parse(&self, _env: &E, _stream: &TokenStream<'_>, input: &T) -> Result<Vec<T>> {
        Ok(vec![input.clone()])
    }

    fn left(&self, _env: &E, result: &Vec<T>) -> Outcome<T> {
        match result.as_slice() {
            [item] => Ok(Some(item.clone())),
            _ => Ok(None),
        }
    }
}

/// Appends an element to a list.
///
/// The inverses refuse to shrink a list to fewer than `min_count` elements,
/// which is what stops repetition while printing.
///
/// Every step copies the list so earlier accumulators stay valid for
/// backtracking. Parsing or printing `n` elements therefore costs O(n²); for
/// very long lists, fold into a structurally shared accumulator instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsFold {
    min_count: usize,
}

impl ConsFold {
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }
}

impl<E, T: Data> Fold<E, Vec<T>, T> for ConsFold {
    fn apply(&self, _env: &E, _stream: &TokenStream<'_>, left: &Vec<T>, right: T) -> Result<Vec<T>> {
        let mut list = Vec::with_capacity(left.len() + 1);
        list.extend_from_slice(left);
        list.push(right);
        Ok(list)
    }

    fn left_inverse(&self, _env: &E, result: &Vec<T>) -> Outcome<Vec<T>> {
        if result.len() <= self.min_count {
            return Ok(None);
        }
        Ok(Some(result[..result.len() - 1].to_vec()))
    }

    fn right_inverse(&self, _env: &E, result: &Vec<T>) -> Outcome<T> {
        if result.len() <= self.min_count {
            return Ok(None);
        }
        Ok(result.last().cloned())
    }
}

/// Reorders a fixed-size list: element `i` of the output is element
/// `order[i]` of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPermutator {
    order: Vec<usize>,
}

impl ListPermutator {
    /// `order` must be a permutation of `0..order.len()`.
    pub fn new(order: impl Into<Vec<usize>>) -> Result<Self> {
        let order = order.into();
        let mut seen = vec![false; order.len()];
        for &index in &order {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(Error::InvalidValue(format!(
                        "{order:?} is not a permutation"
                    )));
                }
            }
        }
        Ok(Self { order })
    }
}

impl<E, T: Data> Mapping<E, Vec<T>, Vec<T>> for ListPermutator {
    fn parse(&self, _env: &E, _stream: &TokenStream<'_>, input: &Vec<T>) -> Result<Vec<T>> {
        if input.len() != self.order.len() {
            return Err(Error::InvalidValue(format!(
                "expected a list of {} elements, got {}",
                self.order.len(),
                input.len()
            )));
        }
        Ok(self.order.iter().map(|&i| input[i].clone()).collect())
    }

    fn left(&self, _env: &E, result: &Vec<T>) -> Outcome<Vec<T>> {
        if result.len() != self.order.len() {
            return Ok(None);
        }
        let mut list = result.clone();
        for (item, &index) in result.iter().zip(&self.order) {
            list[index] = item.clone();
        }
        Ok(Some(list))
    }
}
