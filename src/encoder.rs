//! The encoding interface shared by every output format.
//!
//! A format is a type implementing [`Encode`]. The crate ships
//! [`JsonEncoder`](crate::json::JsonEncoder) and
//! [`XmlEncoder`](crate::xml::XmlEncoder); other structured text formats plug
//! in through [`encode_with`](crate::encode_with).
//!
//! Encoders write into a private buffer and hand it back only when the whole
//! walk succeeded, so callers never observe a partial document.
//!
//! ## Implementing a format
//!
//! ```rust
//! use record_codec::{encode_with, EncodeOptions, Encode, FieldSpec, Record, Result};
//!
//! /// One `key=value` line per retained scalar field.
//! struct Lines;
//!
//! impl Encode for Lines {
//!     fn name(&self) -> &'static str {
//!         "lines"
//!     }
//!
//!     fn encode_record(&self, record: &Record, _options: &EncodeOptions) -> Result<String> {
//!         Ok(record
//!             .retained_fields()
//!             .map(|f| format!("{}={}", f.output_name(), f.value))
//!             .collect::<Vec<_>>()
//!             .join("\n"))
//!     }
//! }
//!
//! let record = Record::new("r")
//!     .with_field(FieldSpec::new("A", 1))
//!     .with_field(FieldSpec::new("B", 0).omit_empty());
//! let doc = encode_with(&record, &Lines, &EncodeOptions::new()).unwrap();
//! assert_eq!(doc.as_str(), "A=1");
//! ```

use crate::json::JsonEncoder;
use crate::xml::XmlEncoder;
use crate::{EncodeOptions, Error, FieldSpec, Format, Record, Result, Value};
use std::collections::HashSet;
use std::fmt;

/// A structured text format that records can be encoded into.
pub trait Encode {
    /// Human-readable format name, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Encodes a record as the document root.
    ///
    /// # Errors
    ///
    /// Returns an error if any retained value cannot be represented.
    fn encode_record(&self, record: &Record, options: &EncodeOptions) -> Result<String>;

    /// Encodes an arbitrary value as the document root.
    ///
    /// The default accepts records only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValueType`] for non-record roots unless
    /// the format overrides this method.
    fn encode_value(&self, value: &Value, options: &EncodeOptions) -> Result<String> {
        match value {
            Value::Record(record) => self.encode_record(record, options),
            other => Err(Error::unsupported_type(&format!(
                "{} at {} document root",
                other.kind(),
                self.name()
            ))),
        }
    }
}

/// Returns the built-in encoder for `format`.
#[must_use]
pub fn encoder_for(format: Format) -> &'static dyn Encode {
    match format {
        Format::Json => &JsonEncoder,
        Format::Xml => &XmlEncoder,
    }
}

/// The textual output of a successful encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedDocument {
    text: String,
    format: &'static str,
}

impl EncodedDocument {
    pub(crate) fn new(text: String, format: &'static str) -> Self {
        EncodedDocument { text, format }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Name of the format that produced this document.
    #[must_use]
    pub fn format_name(&self) -> &'static str {
        self.format
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for EncodedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for EncodedDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<EncodedDocument> for String {
    fn from(doc: EncodedDocument) -> Self {
        doc.text
    }
}

/// Splits the pretty-printing indent into one repeated byte and its count.
///
/// Both `serde_json` and `quick-xml` take the indent in this shape, and only
/// spaces and tabs keep the output well-formed.
pub(crate) fn indent_unit(options: &EncodeOptions) -> Result<(u8, usize)> {
    let indent = options.indent.as_bytes();
    match indent.first() {
        None => Ok((b' ', 0)),
        Some(&unit @ (b' ' | b'\t')) if indent.iter().all(|&b| b == unit) => {
            Ok((unit, indent.len()))
        }
        Some(_) => Err(Error::InvalidIndent(options.indent.clone())),
    }
}

/// Collects the fields that appear in output, logging the ones dropped.
pub(crate) fn retained(record: &Record) -> Vec<&FieldSpec> {
    let mut fields = Vec::with_capacity(record.len());
    for field in record.fields() {
        if field.is_retained() {
            fields.push(field);
        } else {
            log::trace!(
                "omitting empty field `{}` of record `{}`",
                field.name,
                record.name()
            );
        }
    }
    fields
}

/// Fails on the first output name used by two sibling fields, if `format`
/// forbids repeated names.
pub(crate) fn ensure_unique_names(fields: &[&FieldSpec], format: Format) -> Result<()> {
    if !format.forbids_duplicate_names() {
        return Ok(());
    }
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field.output_name()) {
            return Err(Error::duplicate_output_name(
                field.output_name(),
                &format.to_string(),
            ));
        }
    }
    Ok(())
}
