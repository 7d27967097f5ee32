//! # record_codec
//!
//! Tag-driven record encoding for JSON and XML with presence-based field
//! omission.
//!
//! ## What it does
//!
//! A [`Record`] is an ordered list of [`FieldSpec`]s. Each field carries a
//! value, an optional output name, and an `omit_if_empty` flag. Encoding
//! writes every field under its output name, except fields that are flagged
//! and hold the zero value of their kind (`false`, `0`, `""`, empty sequence,
//! empty record, null), which are left out entirely.
//!
//! ## Key Features
//!
//! - **Omit-if-empty**: flagged zero-valued fields never reach the output
//! - **Output names**: each field may be renamed independently of its source name
//! - **Two formats**: JSON objects and XML elements behind one [`Encode`] interface
//! - **Tag tables**: declare `"name,omitempty"` tags once in a [`FieldMap`]
//! - **Serde bridge**: turn any `T: Serialize` into a record with [`to_record`]
//! - **All or nothing**: errors abort encoding before any output is returned
//!
//! ## Quick Start
//!
//! ```rust
//! use record_codec::{encode, FieldSpec, Format, Record};
//!
//! let mut record = Record::new("test")
//!     .with_field(FieldSpec::new("TestKey", false).rename("test_key").omit_empty());
//!
//! // `false` is the zero value of a boolean, so the field is omitted
//! assert_eq!(encode(&record, Format::Json).unwrap().as_str(), "{}");
//!
//! record.set("TestKey", true).unwrap();
//! assert_eq!(
//!     encode(&record, Format::Json).unwrap().as_str(),
//!     r#"{"test_key":true}"#
//! );
//! assert_eq!(
//!     encode(&record, Format::Xml).unwrap().as_str(),
//!     "<test><test_key>true</test_key></test>"
//! );
//! ```
//!
//! ### Pretty output
//!
//! ```rust
//! use record_codec::{encode_with_options, EncodeOptions, FieldSpec, Format, Record};
//!
//! let record = Record::new("point")
//!     .with_field(FieldSpec::new("X", 1).rename("x"))
//!     .with_field(FieldSpec::new("Y", 0).rename("y").omit_empty());
//!
//! let doc = encode_with_options(&record, Format::Xml, &EncodeOptions::pretty()).unwrap();
//! assert_eq!(doc.as_str(), "<point>\n  <x>1</x>\n</point>");
//! ```
//!
//! ### From Rust types
//!
//! ```rust
//! use record_codec::{encode, to_record, FieldMap, Format, Schema};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     nickname: String,
//! }
//!
//! let schema = Schema::new().with(
//!     "User",
//!     FieldMap::new().tag("nickname", "nick,omitempty").unwrap(),
//! );
//!
//! let user = User { id: 7, nickname: String::new() };
//! let record = to_record(&user, &schema).unwrap();
//! assert_eq!(encode(&record, Format::Json).unwrap().as_str(), r#"{"id":7}"#);
//! ```
//!
//! ## Guarantees
//!
//! - Encoding is a pure function of the record, the format and the options;
//!   the same input always produces byte-identical output
//! - The record is never mutated by encoding
//! - No `unsafe` code
//!
//! See the [`format`] module for the exact output rules.

pub mod de;
pub mod encoder;
pub mod error;
pub mod format;
pub mod json;
pub mod macros;
pub mod map;
pub mod options;
pub mod record;
pub mod ser;
pub mod value;
pub mod xml;

pub use de::{decode, decode_value};
pub use encoder::{encoder_for, Encode, EncodedDocument};
pub use error::{Error, Result};
pub use json::JsonEncoder;
pub use map::{FieldMap, FieldTag, Schema};
pub use options::{EncodeOptions, Format};
pub use record::{FieldSpec, Record};
pub use ser::{to_value, ValueSerializer};
pub use value::{Value, ValueKind};
pub use xml::XmlEncoder;

use serde::Serialize;
use std::io;

/// Encodes a record in `format` with compact output.
///
/// # Examples
///
/// ```rust
/// use record_codec::{encode, FieldSpec, Format, Record};
///
/// let record = Record::new("test")
///     .with_field(FieldSpec::new("TestKey", 0).rename("test_key").omit_empty());
/// assert_eq!(encode(&record, Format::Xml).unwrap().as_str(), "<test></test>");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedValueType`] if a retained value cannot be
/// represented in `format`, [`Error::DuplicateOutputName`] if two retained
/// sibling fields share a name where the format forbids it, and
/// [`Error::InvalidName`] for output names that are not legal XML names.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(record: &Record, format: Format) -> Result<EncodedDocument> {
    encode_with_options(record, format, &EncodeOptions::default())
}

/// Encodes a record in `format` with custom options.
///
/// # Errors
///
/// See [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(
    record: &Record,
    format: Format,
    options: &EncodeOptions,
) -> Result<EncodedDocument> {
    encode_with(record, encoder_for(format), options)
}

/// Encodes a record with any [`Encode`] implementation.
///
/// # Errors
///
/// Returns whatever error the encoder reports.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with<E>(record: &Record, encoder: &E, options: &EncodeOptions) -> Result<EncodedDocument>
where
    E: Encode + ?Sized,
{
    log::debug!(
        "encoding record `{}` ({} fields) as {}",
        record.name(),
        record.len(),
        encoder.name()
    );
    let text = encoder.encode_record(record, options)?;
    Ok(EncodedDocument::new(text, encoder.name()))
}

/// Encodes any value as the document root.
///
/// JSON accepts every value kind at the root; XML accepts records only.
///
/// # Examples
///
/// ```rust
/// use record_codec::{encode_value, EncodeOptions, Error, Format, Value};
///
/// let options = EncodeOptions::new();
/// assert_eq!(encode_value(&Value::from(true), Format::Json, &options).unwrap().as_str(), "true");
/// assert!(matches!(
///     encode_value(&Value::from(true), Format::Xml, &options),
///     Err(Error::UnsupportedValueType(_))
/// ));
/// ```
///
/// # Errors
///
/// See [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_value(value: &Value, format: Format, options: &EncodeOptions) -> Result<EncodedDocument> {
    let encoder = encoder_for(format);
    log::debug!("encoding {} value as {}", value.kind(), encoder.name());
    let text = encoder.encode_value(value, options)?;
    Ok(EncodedDocument::new(text, encoder.name()))
}

/// Encodes a record and writes the finished document to `writer`.
///
/// Nothing is written if encoding fails.
///
/// # Examples
///
/// ```rust
/// use record_codec::{to_writer, EncodeOptions, FieldSpec, Format, Record};
///
/// let record = Record::new("r").with_field(FieldSpec::new("a", 1));
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &record, Format::Json, &EncodeOptions::new()).unwrap();
/// assert_eq!(buffer, br#"{"a":1}"#);
/// ```
///
/// # Errors
///
/// Returns an encoding error, or [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(
    mut writer: W,
    record: &Record,
    format: Format,
    options: &EncodeOptions,
) -> Result<()>
where
    W: io::Write,
{
    let doc = encode_with_options(record, format, options)?;
    writer
        .write_all(doc.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Converts any `T: Serialize` into a record and applies `schema`.
///
/// The root must serialize as a struct or a map.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValueType`] for data with no record form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_record<T>(value: &T, schema: &Schema) -> Result<Record>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Record(record) => Ok(schema.apply(record)),
        other => Err(Error::unsupported_type(&format!(
            "{} as a record root",
            other.kind()
        ))),
    }
}
