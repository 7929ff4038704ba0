//! Typed field setters.
//!
//! A [`Setter`] is a fold that stores the parsed value into an optional field
//! of a copy of the accumulator. It is built from a getter/setter pair, so
//! the field is checked by the compiler. [`setter!`](crate::setter) writes
//! the pair for a plain `Option` field:
//!
//! ```
//! use janus::setter;
//!
//! #[derive(Clone, Default, PartialEq, Debug)]
//! struct Assign {
//!     target: Option<String>,
//!     value: Option<i64>,
//! }
//!
//! let value = setter!(Assign, value);
//! assert_eq!(value.name(), "value");
//! ```

use std::fmt;
use std::sync::Arc;

use janus_lexer::TokenStream;

use crate::fold::Fold;
use crate::{Data, Outcome, Result};

type Getter<T, V> = dyn Fn(&T) -> Option<V> + Send + Sync;
type Update<T, V> = dyn Fn(&T, Option<V>) -> T + Send + Sync;

/// Fold that sets one optional field of `T` on a copy.
///
/// `left_inverse` clears the field on a copy and `right_inverse` reads it;
/// both report `None` while the field is unset.
pub struct Setter<T, V> {
    name: &'static str,
    get: Arc<Getter<T, V>>,
    set: Arc<Update<T, V>>,
}

impl<T, V> Clone for Setter<T, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<T: Data, V: Data> Setter<T, V> {
    /// `set` must return a new value and leave its argument alone.
    pub fn new(
        name: &'static str,
        get: impl Fn(&T) -> Option<V> + Send + Sync + 'static,
        set: impl Fn(&T, Option<V>) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<E, T: Data, V: Data> Fold<E, T, V> for Setter<T, V> {
    fn apply(&self, _env: &E, _stream: &TokenStream<'_>, left: &T, right: V) -> Result<T> {
        Ok((self.set)(left, Some(right)))
    }

    fn left_inverse(&self, _env: &E, result: &T) -> Outcome<T> {
        if (self.get)(result).is_none() {
            return Ok(None);
        }
        Ok(Some((self.set)(result, None)))
    }

    fn right_inverse(&self, _env: &E, result: &T) -> Outcome<V> {
        Ok((self.get)(result))
    }
}

impl<T, V> fmt::Debug for Setter<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter").field("name", &self.name).finish()
    }
}

/// Build a [`Setter`] for an `Option` field of a `Clone` struct.
#[macro_export]
macro_rules! setter {
    ($ty:ty, $field:ident) => {
        $crate::utils::setter::Setter::new(
            stringify!($field),
            |value: &$ty| value.$field.clone(),
            |value: &$ty, field| {
                let mut copy = value.clone();
                copy.$field = field;
                copy
            },
        )
    };
}
