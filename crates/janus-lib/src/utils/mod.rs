//! Ready-made folds and mappings.
//!
//! - [`list`]: right-growing lists (`ConsFold`, `EmptyList`, `singleton`, `ListPermutator`)
//! - [`common`]: counters
//! - [`setter`]: typed field setters built from accessor closures
//! - [`record`]: dynamic records and the name-indexed `PropertySetter`

pub mod common;
pub mod list;
pub mod record;
pub mod setter;

#[cfg(test)]
mod record_tests;

pub use common::IntIncrementor;
pub use list::{ConsFold, EmptyList, ListPermutator, singleton};
pub use record::{Kind, Properties, PropertySetter, Record, RecordType, Value};
pub use setter::Setter;
