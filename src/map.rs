//! Declarative tag tables.
//!
//! Field metadata is declared once, at initialization time, as a table from
//! source field name to [`FieldTag`]. A tag holds the output name, the
//! omission policy and whether the field is skipped altogether. Tags can be
//! written in the familiar `"name,omitempty"` string form.
//!
//! - [`FieldTag`]: metadata for one field
//! - [`FieldMap`]: ordered table of tags for one record type
//! - [`Schema`]: tables for several record types, applied recursively
//!
//! ## Examples
//!
//! ```rust
//! use record_codec::{encode, FieldMap, Format, Value};
//!
//! let map = FieldMap::new()
//!     .tag("TestKey", "test_key,omitempty").unwrap();
//!
//! let record = map.record("test", vec![("TestKey", Value::from(false))]);
//! assert_eq!(encode(&record, Format::Json).unwrap().as_str(), "{}");
//! ```

use crate::{Error, FieldSpec, Record, Result, Value};
use indexmap::IndexMap;

/// Output metadata for one field.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FieldTag {
    pub output_name: Option<String>,
    pub omit_if_empty: bool,
    pub skip: bool,
}

impl FieldTag {
    /// Creates a tag that renames the field.
    #[must_use]
    pub fn renamed(output_name: impl Into<String>) -> Self {
        FieldTag {
            output_name: Some(output_name.into()),
            ..Default::default()
        }
    }

    /// Creates a tag that drops the field from every record.
    #[must_use]
    pub fn skipped() -> Self {
        FieldTag {
            skip: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn omit_empty(mut self) -> Self {
        self.omit_if_empty = true;
        self
    }

    /// Parses a tag string.
    ///
    /// The first comma-separated segment is the output name; an empty segment
    /// keeps the source name. The only option is `omitempty`. A lone `-`
    /// skips the field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_codec::FieldTag;
    ///
    /// let tag = FieldTag::parse("test_key,omitempty").unwrap();
    /// assert_eq!(tag.output_name.as_deref(), Some("test_key"));
    /// assert!(tag.omit_if_empty);
    ///
    /// let tag = FieldTag::parse(",omitempty").unwrap();
    /// assert_eq!(tag.output_name, None);
    ///
    /// assert!(FieldTag::parse("-").unwrap().skip);
    /// assert!(FieldTag::parse("id,string").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] for unknown options.
    pub fn parse(tag: &str) -> Result<Self> {
        if tag == "-" {
            return Ok(FieldTag::skipped());
        }

        let mut parts = tag.split(',');
        let name = parts.next().unwrap_or_default().trim();
        let mut parsed = FieldTag {
            output_name: (!name.is_empty()).then(|| name.to_string()),
            ..Default::default()
        };

        for option in parts {
            match option.trim() {
                "omitempty" => parsed.omit_if_empty = true,
                "" => {}
                other => {
                    return Err(Error::invalid_tag(
                        tag,
                        &format!("unknown option `{}`", other),
                    ))
                }
            }
        }

        Ok(parsed)
    }

    /// Builds the field spec for `name` carrying `value`, or `None` if the
    /// tag skips the field.
    #[must_use]
    pub fn apply(&self, name: impl Into<String>, value: Value) -> Option<FieldSpec> {
        if self.skip {
            return None;
        }
        Some(FieldSpec {
            name: name.into(),
            output_name: self.output_name.clone(),
            value,
            omit_if_empty: self.omit_if_empty,
        })
    }
}

/// An ordered table of field tags for one record type.
///
/// Fields without an entry keep their source name and are never omitted.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FieldMap(IndexMap<String, FieldTag>);

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        FieldMap(IndexMap::new())
    }

    /// Adds a tag parsed from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTag`] if the tag string is malformed.
    pub fn tag(mut self, field: impl Into<String>, tag: &str) -> Result<Self> {
        self.0.insert(field.into(), FieldTag::parse(tag)?);
        Ok(self)
    }

    /// Adds or replaces the tag for a field.
    pub fn insert(&mut self, field: impl Into<String>, tag: FieldTag) -> Option<FieldTag> {
        self.0.insert(field.into(), tag)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldTag> {
        self.0.get(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldTag> {
        self.0.iter()
    }

    /// Builds a record from `(field name, value)` pairs, applying the table.
    ///
    /// Field order follows `fields`, not the table.
    #[must_use]
    pub fn record<N, I>(&self, name: &str, fields: I) -> Record
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        let mut record = Record::new(name);
        for (field, value) in fields {
            let field = field.into();
            let spec = match self.0.get(&field) {
                Some(tag) => tag.apply(field, value),
                None => Some(FieldSpec::new(field, value)),
            };
            if let Some(spec) = spec {
                record.push(spec);
            }
        }
        record
    }

    /// Re-tags an existing record's fields in place of their current metadata.
    ///
    /// Fields without an entry are left as they are.
    #[must_use]
    pub fn retag(&self, record: Record) -> Record {
        let name = record.name().to_string();
        let mut out = Record::with_capacity(name, record.len());
        for field in record {
            match self.0.get(&field.name) {
                Some(tag) => {
                    if let Some(spec) = tag.apply(field.name, field.value) {
                        out.push(spec);
                    }
                }
                None => out.push(field),
            }
        }
        out
    }
}

impl FromIterator<(String, FieldTag)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, FieldTag)>>(iter: T) -> Self {
        FieldMap(IndexMap::from_iter(iter))
    }
}

/// Tag tables for several record types, keyed by record name.
///
/// # Examples
///
/// ```rust
/// use record_codec::{FieldMap, FieldSpec, Record, Schema, Value};
///
/// let schema = Schema::new()
///     .with("inner", FieldMap::new().tag("Flag", "flag,omitempty").unwrap());
///
/// let record = Record::new("outer").with_field(FieldSpec::new(
///     "Inner",
///     Record::new("inner").with_field(FieldSpec::new("Flag", false)),
/// ));
///
/// let tagged = schema.apply(record);
/// let inner = tagged.get("Inner").and_then(Value::as_record).unwrap();
/// assert!(inner.field("Flag").unwrap().omit_if_empty);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Schema(IndexMap<String, FieldMap>);

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Schema(IndexMap::new())
    }

    /// Registers the table for records named `record`.
    #[must_use]
    pub fn with(mut self, record: impl Into<String>, map: FieldMap) -> Self {
        self.0.insert(record.into(), map);
        self
    }

    #[must_use]
    pub fn get(&self, record: &str) -> Option<&FieldMap> {
        self.0.get(record)
    }

    /// Applies the matching table to `record` and to every nested record,
    /// including records inside sequences.
    #[must_use]
    pub fn apply(&self, record: Record) -> Record {
        let record = match self.0.get(record.name()) {
            Some(map) => map.retag(record),
            None => record,
        };

        let name = record.name().to_string();
        let mut out = Record::with_capacity(name, record.len());
        for mut field in record {
            field.value = self.apply_value(field.value);
            out.push(field);
        }
        out
    }

    fn apply_value(&self, value: Value) -> Value {
        match value {
            Value::Record(r) => Value::Record(self.apply(r)),
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(|v| self.apply_value(v)).collect())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            FieldTag::parse("test_key").unwrap(),
            FieldTag::renamed("test_key")
        );
        assert_eq!(
            FieldTag::parse("test_key,omitempty").unwrap(),
            FieldTag::renamed("test_key").omit_empty()
        );
        assert_eq!(FieldTag::parse("").unwrap(), FieldTag::default());
        assert_eq!(FieldTag::parse("-").unwrap(), FieldTag::skipped());
        assert!(matches!(
            FieldTag::parse("a,inline"),
            Err(Error::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_record_applies_table() {
        let map = FieldMap::new()
            .tag("TestKey", "test_key,omitempty")
            .unwrap()
            .tag("Secret", "-")
            .unwrap();

        let record = map.record(
            "test",
            vec![
                ("TestKey", Value::from(true)),
                ("Secret", Value::from("hunter2")),
                ("Plain", Value::from(0)),
            ],
        );

        assert_eq!(record.len(), 2);
        let key = record.field("TestKey").unwrap();
        assert_eq!(key.output_name(), "test_key");
        assert!(key.omit_if_empty);
        assert!(record.field("Secret").is_none());

        let plain = record.field("Plain").unwrap();
        assert_eq!(plain.output_name(), "Plain");
        assert!(!plain.omit_if_empty);
    }

    #[test]
    fn test_schema_reaches_sequences() {
        let schema = Schema::new().with("item", FieldMap::new().tag("Id", "id").unwrap());
        let record = Record::new("list").with_field(FieldSpec::new(
            "Items",
            vec![
                Value::from(Record::new("item").with_field(FieldSpec::new("Id", 1))),
                Value::from(Record::new("item").with_field(FieldSpec::new("Id", 2))),
            ],
        ));

        let tagged = schema.apply(record);
        let items = tagged.get("Items").and_then(Value::as_sequence).unwrap();
        for item in items {
            let id = item.as_record().and_then(|r| r.field("Id")).unwrap();
            assert_eq!(id.output_name(), "id");
        }
    }
}
