//! Dynamic records and the name-indexed property setter.
//!
//! [`PropertySetter`] works on anything implementing [`Properties`]: read a
//! field by name, and produce a copy with a field replaced. Field names are
//! only checked when the fold runs, so a misspelled name or a value of the
//! wrong kind surfaces as an error at parse or print time. Prefer the typed
//! [`Setter`](super::Setter) when the target is a Rust struct.
//!
//! [`Record`] is the stock implementation: a type name plus a declared,
//! ordered set of fields, each with an expected [`Kind`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use janus_lexer::TokenStream;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::fold::Fold;
use crate::{Data, Error, Outcome, Result};

/// Kind of a dynamic value, used to check field writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Any,
    Bool,
    Int,
    Str,
    List,
    Record,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Str => "string",
            Self::List => "list",
            Self::Record => "record",
        };
        f.write_str(name)
    }
}

/// Dynamic value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Str(_) => Kind::Str,
            Self::List(_) => Kind::List,
            Self::Record(_) => Kind::Record,
        }
    }

    /// Kind for error messages; records report their type name.
    pub fn kind_name(&self) -> String {
        match self {
            Self::Record(record) => record.type_name().to_owned(),
            other => other.kind().to_string(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::List(items) => items.serialize(serializer),
            Self::Record(record) => record.serialize(serializer),
        }
    }
}

/// Declared shape of a record: a name and ordered, typed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    name: String,
    fields: IndexMap<String, Kind>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, kind: Kind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_kind(&self, name: &str) -> Option<Kind> {
        self.fields.get(name).copied()
    }

    /// A record of this type with every field unset.
    pub fn instance(self) -> Record {
        Record::new(Arc::new(self))
    }
}

/// Instance of a [`RecordType`].
///
/// Field values are stored behind an `Arc` and copied on write, so copies
/// share storage until one of them is modified.
#[derive(Debug, Clone)]
pub struct Record {
    ty: Arc<RecordType>,
    values: Arc<IndexMap<String, Value>>,
}

impl Record {
    pub fn new(ty: Arc<RecordType>) -> Self {
        Self {
            ty,
            values: Arc::new(IndexMap::new()),
        }
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    pub fn get(&self, field: &str) -> Result<Option<&Value>> {
        self.check_field(field)?;
        Ok(self.values.get(field))
    }

    /// Copy with `field` set to `value`, or cleared for `None`.
    pub fn with(&self, field: &str, value: Option<Value>) -> Result<Self> {
        let expected = self.check_field(field)?;
        let mut values = Arc::clone(&self.values);
        match value {
            Some(value) => {
                if expected != Kind::Any && expected != value.kind() {
                    return Err(Error::FieldTypeMismatch {
                        type_name: self.type_name().to_owned(),
                        field: field.to_owned(),
                        expected: expected.to_string(),
                        found: value.kind_name(),
                    });
                }
                Arc::make_mut(&mut values).insert(field.to_owned(), value);
            }
            None => {
                Arc::make_mut(&mut values).shift_remove(field);
            }
        }
        Ok(Self {
            ty: Arc::clone(&self.ty),
            values,
        })
    }

    /// Whether two records point at the same field storage.
    pub fn shares_storage_with(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    fn check_field(&self, field: &str) -> Result<Kind> {
        self.ty
            .field_kind(field)
            .ok_or_else(|| Error::UnknownField {
                type_name: self.type_name().to_owned(),
                field: field.to_owned(),
            })
    }
}

/// Field order does not matter for equality; declared order is kept for output.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .all(|(name, value)| other.values.get(name) == Some(value))
    }
}

impl Eq for Record {}

/// Serialized as a map: `"type"` first, then set fields in declared order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("type", self.type_name())?;
        for name in self.ty.fields.keys() {
            if let Some(value) = self.values.get(name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

/// Name-indexed access to the fields of a value.
pub trait Properties<V>: Data {
    /// Current value of `field`, `None` if unset.
    fn property(&self, field: &str) -> Result<Option<V>>;

    /// Copy of `self` with `field` replaced; `None` clears it.
    fn with_property(&self, field: &str, value: Option<V>) -> Result<Self>;
}

impl Properties<Value> for Record {
    fn property(&self, field: &str) -> Result<Option<Value>> {
        Ok(self.get(field)?.cloned())
    }

    fn with_property(&self, field: &str, value: Option<Value>) -> Result<Self> {
        self.with(field, value)
    }
}

impl Properties<Value> for Value {
    fn property(&self, field: &str) -> Result<Option<Value>> {
        expect_record(self, field)?.property(field)
    }

    fn with_property(&self, field: &str, value: Option<Value>) -> Result<Self> {
        Ok(Value::Record(expect_record(self, field)?.with(field, value)?))
    }
}

fn expect_record<'v>(value: &'v Value, field: &str) -> Result<&'v Record> {
    value.as_record().ok_or_else(|| Error::UnknownField {
        type_name: value.kind_name(),
        field: field.to_owned(),
    })
}

/// Fold that writes the parsed value into a named field of a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySetter {
    field: String,
}

impl PropertySetter {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl<E, T: Properties<V>, V: Data> Fold<E, T, V> for PropertySetter {
    fn apply(&self, _env: &E, _stream: &TokenStream<'_>, left: &T, right: V) -> Result<T> {
        left.with_property(&self.field, Some(right))
    }

    fn left_inverse(&self, _env: &E, result: &T) -> Outcome<T> {
        if result.property(&self.field)?.is_none() {
            return Ok(None);
        }
        result.with_property(&self.field, None).map(Some)
    }

    fn right_inverse(&self, _env: &E, result: &T) -> Outcome<V> {
        result.property(&self.field)
    }
}
