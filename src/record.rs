//! Records and their field specifications.
//!
//! A [`Record`] is a named, ordered list of [`FieldSpec`]s. Each field carries
//! its source name, an optional output name, its value, and the omission
//! policy. Field order is preserved all the way to the encoded document.
//!
//! ## Building records
//!
//! ```rust
//! use record_codec::{FieldSpec, Record};
//!
//! let record = Record::new("test")
//!     .with_field(FieldSpec::new("TestKey", false).rename("test_key").omit_empty())
//!     .with_field(FieldSpec::new("Count", 3));
//!
//! assert_eq!(record.len(), 2);
//! assert_eq!(record.retained_fields().count(), 1);
//! ```
//!
//! ## Updating nested fields
//!
//! Nested values are replaced through a dotted path of source field names,
//! so callers never hold a mutable reference into the record:
//!
//! ```rust
//! use record_codec::{FieldSpec, Record, Value};
//!
//! let mut record = Record::new("outer").with_field(FieldSpec::new(
//!     "Inner",
//!     Record::new("inner").with_field(FieldSpec::new("Flag", false)),
//! ));
//!
//! record.set("Inner.Flag", true).unwrap();
//! assert_eq!(record.get("Inner.Flag"), Some(&Value::Bool(true)));
//! ```

use crate::{Error, Result, Value};

/// Metadata and value for one field of a [`Record`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Identifier used in source code. Never emitted unless no output name is set.
    pub name: String,
    /// Name used in the encoded document.
    pub output_name: Option<String>,
    pub value: Value,
    /// Drop the field from the output when `value` is the zero value of its kind.
    pub omit_if_empty: bool,
}

impl FieldSpec {
    /// Creates a field that is always emitted under its own name.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldSpec {
            name: name.into(),
            output_name: None,
            value: value.into(),
            omit_if_empty: false,
        }
    }

    /// Sets the name used in the encoded document.
    #[must_use]
    pub fn rename(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = Some(output_name.into());
        self
    }

    /// Marks the field as omitted when its value is zero.
    #[must_use]
    pub fn omit_empty(mut self) -> Self {
        self.omit_if_empty = true;
        self
    }

    /// Returns the output name, falling back to the source name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_codec::FieldSpec;
    ///
    /// assert_eq!(FieldSpec::new("Id", 1).output_name(), "Id");
    /// assert_eq!(FieldSpec::new("Id", 1).rename("id").output_name(), "id");
    /// ```
    #[inline]
    #[must_use]
    pub fn output_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns `true` if the field appears in encoded output.
    #[inline]
    #[must_use]
    pub fn is_retained(&self) -> bool {
        !(self.omit_if_empty && self.value.is_zero())
    }
}

/// An ordered set of named fields representing one struct-like value.
///
/// The record name is used as the element name when the record is the XML
/// document root. JSON output ignores it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Record {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Creates an empty record with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Record {
            name: name.into(),
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Appends a field and returns the record, for chained construction.
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a field.
    pub fn push(&mut self, field: FieldSpec) {
        self.fields.push(field);
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All fields in declared order, omitted or not.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Fields that appear in encoded output, in declared order.
    pub fn retained_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.is_retained())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the first field with the given source name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the value at a dotted path of source field names.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_codec::{FieldSpec, Record, Value};
    ///
    /// let record = Record::new("r").with_field(FieldSpec::new("A", 1));
    /// assert_eq!(record.get("A"), Some(&Value::Integer(1)));
    /// assert_eq!(record.get("A.B"), None);
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut value = &self.field(first)?.value;
        for segment in segments {
            value = &value.as_record()?.field(segment)?.value;
        }
        Some(value)
    }

    /// Replaces the value at a dotted path of source field names.
    ///
    /// The record is left untouched when the path does not resolve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if a segment names no field, or if an
    /// intermediate segment is not a record.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let segments: Vec<&str> = path.split('.').collect();
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| Error::invalid_path(path, "empty path"))?;

        let mut record = self;
        for segment in parents {
            let field = record
                .field_mut(segment)
                .ok_or_else(|| Error::invalid_path(path, &format!("no field `{}`", segment)))?;
            record = field.value.as_record_mut().ok_or_else(|| {
                Error::invalid_path(path, &format!("`{}` is not a record", segment))
            })?;
        }

        let field = record
            .field_mut(last)
            .ok_or_else(|| Error::invalid_path(path, &format!("no field `{}`", last)))?;
        field.value = value.into();
        Ok(())
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FieldSpec> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}

impl IntoIterator for Record {
    type Item = FieldSpec;
    type IntoIter = std::vec::IntoIter<FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Record {
        Record::new("outer")
            .with_field(FieldSpec::new("Id", 7))
            .with_field(FieldSpec::new(
                "Inner",
                Record::new("inner")
                    .with_field(FieldSpec::new("Flag", false))
                    .with_field(FieldSpec::new(
                        "Deep",
                        Record::new("deep").with_field(FieldSpec::new("Name", "")),
                    )),
            ))
    }

    #[test]
    fn test_retained_fields_keep_order() {
        let record = Record::new("r")
            .with_field(FieldSpec::new("A", 1))
            .with_field(FieldSpec::new("B", 0).omit_empty())
            .with_field(FieldSpec::new("C", "c"))
            .with_field(FieldSpec::new("D", "").omit_empty());

        let names: Vec<_> = record.retained_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_non_omittable_zero_is_retained() {
        let field = FieldSpec::new("A", false);
        assert!(field.is_retained());
        assert!(!field.omit_empty().is_retained());
    }

    #[test]
    fn test_set_nested_path() {
        let mut record = nested();
        record.set("Inner.Deep.Name", "gandalf").unwrap();
        assert_eq!(
            record.get("Inner.Deep.Name"),
            Some(&Value::String("gandalf".to_string()))
        );

        record.set("Id", 8).unwrap();
        assert_eq!(record.get("Id"), Some(&Value::Integer(8)));
    }

    #[test]
    fn test_set_missing_field() {
        let mut record = nested();
        let before = record.clone();
        let err = record.set("Inner.Missing", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert_eq!(record, before);
    }

    #[test]
    fn test_set_through_scalar() {
        let mut record = nested();
        let err = record.set("Id.Value", 1).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_path("Id.Value", "`Id` is not a record")
        );
    }

    #[test]
    fn test_get_through_scalar() {
        let record = nested();
        assert_eq!(record.get("Id.Value"), None);
        assert_eq!(record.get(""), None);
    }
}
