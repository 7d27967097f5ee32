//! Dynamic value representation for record fields.
//!
//! This module provides the [`Value`] enum carried by every
//! [`FieldSpec`](crate::FieldSpec), and [`ValueKind`], the kind tag used for
//! zero values and decoding.
//!
//! ## Zero values
//!
//! Each kind has exactly one zero value, which is what `omit_if_empty`
//! compares against:
//!
//! | Kind | Zero value |
//! |------|------------|
//! | Null | `Null` |
//! | Bool | `false` |
//! | Integer | `0` |
//! | String | `""` |
//! | Record | a record with no fields |
//! | Sequence | an empty sequence |
//!
//! ```rust
//! use record_codec::Value;
//!
//! assert!(Value::from(false).is_zero());
//! assert!(Value::from(0).is_zero());
//! assert!(Value::from("").is_zero());
//! assert!(!Value::from("x").is_zero());
//! ```

use crate::encoder::ensure_unique_names;
use crate::{Format, Record};
use serde::{Serialize, Serializer};
use std::fmt;

/// A dynamically-typed field value.
///
/// # Examples
///
/// ```rust
/// use record_codec::{Record, Value};
///
/// let flag = Value::from(true);
/// let count = Value::from(42);
/// let tags = Value::from(vec![Value::from("a"), Value::from("b")]);
/// let nested = Value::from(Record::new("inner"));
///
/// assert!(flag.is_bool());
/// assert_eq!(count.as_i64(), Some(42));
/// assert_eq!(tags.as_sequence().map(Vec::len), Some(2));
/// assert!(nested.is_record());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    String(String),
    Record(Record),
    Sequence(Vec<Value>),
}

/// The kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    String,
    Record,
    Sequence,
}

impl ValueKind {
    /// Returns a lowercase name for this kind, used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::Record => "record",
            ValueKind::Sequence => "sequence",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the kind of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Record(_) => ValueKind::Record,
            Value::Sequence(_) => ValueKind::Sequence,
        }
    }

    /// Returns `true` if this value equals the zero value of its kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_codec::{FieldSpec, Record, Value};
    ///
    /// assert!(Value::Null.is_zero());
    /// assert!(Value::Sequence(vec![]).is_zero());
    /// assert!(Value::from(Record::new("empty")).is_zero());
    ///
    /// let filled = Record::new("r").with_field(FieldSpec::new("A", 0));
    /// assert!(!Value::from(filled).is_zero());
    /// ```
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Integer(i) => *i == 0,
            Value::String(s) => s.is_empty(),
            Value::Record(r) => r.is_empty(),
            Value::Sequence(seq) => seq.is_empty(),
        }
    }

    /// Returns the zero value shaped like `self`.
    ///
    /// Records keep their name so the result still renders as the same
    /// element in XML.
    #[must_use]
    pub fn zero_like(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Bool(_) => Value::Bool(false),
            Value::Integer(_) => Value::Integer(0),
            Value::String(_) => Value::String(String::new()),
            Value::Record(r) => Value::Record(Record::new(r.name())),
            Value::Sequence(_) => Value::Sequence(Vec::new()),
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a nested record.
    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Record(r) => write!(f, "{}{{{} fields}}", r.name(), r.len()),
            Value::Sequence(seq) => {
                write!(
                    f,
                    "[{}]",
                    seq.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
        }
    }
}

// Omission applies here too, so any serde format sees the same fields
// the built-in encoders emit.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::String(s) => serializer.serialize_str(s),
            Value::Record(r) => r.serialize(serializer),
            Value::Sequence(seq) => {
                use serde::ser::SerializeSeq;
                let mut out = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    out.serialize_element(element)?;
                }
                out.end()
            }
        }
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{Error as _, SerializeMap};
        let retained: Vec<_> = self.retained_fields().collect();
        ensure_unique_names(&retained, Format::Json).map_err(S::Error::custom)?;
        let mut map = serializer.serialize_map(Some(retained.len()))?;
        for field in retained {
            map.serialize_entry(field.output_name(), &field.value)?;
        }
        map.end()
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.kind()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
