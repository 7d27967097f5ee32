//! JSON output.
//!
//! Records become objects keyed by output name, sequences become arrays and
//! `Null` becomes `null`. Sibling keys must be unique.
//!
//! ```rust
//! use record_codec::{encode_with_options, EncodeOptions, FieldSpec, Format, Record, Value};
//!
//! let record = Record::new("user")
//!     .with_field(FieldSpec::new("Name", "Bilbo").rename("name"))
//!     .with_field(FieldSpec::new("Tags", vec![Value::from("hobbit")]).rename("tags"));
//!
//! let doc = encode_with_options(&record, Format::Json, &EncodeOptions::pretty()).unwrap();
//! assert_eq!(
//!     doc.as_str(),
//!     "{\n  \"name\": \"Bilbo\",\n  \"tags\": [\n    \"hobbit\"\n  ]\n}"
//! );
//! ```

use crate::encoder::{ensure_unique_names, indent_unit, retained, Encode};
use crate::{EncodeOptions, Error, Format, Record, Result, Value};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::Serializer;

/// Encodes records as JSON objects.
///
/// The tree is checked for duplicate keys first, then written by
/// `serde_json` through the [`Serialize`] impls on [`Record`] and [`Value`].
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonEncoder;

impl Encode for JsonEncoder {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn encode_record(&self, record: &Record, options: &EncodeOptions) -> Result<String> {
        check_record(record)?;
        write_document(record, options)
    }

    // Every value kind has a JSON form, so any root is accepted.
    fn encode_value(&self, value: &Value, options: &EncodeOptions) -> Result<String> {
        check_value(value)?;
        write_document(value, options)
    }
}

fn check_record(record: &Record) -> Result<()> {
    let fields = retained(record);
    ensure_unique_names(&fields, Format::Json)?;
    fields.iter().try_for_each(|field| check_value(&field.value))
}

fn check_value(value: &Value) -> Result<()> {
    match value {
        Value::Record(r) => check_record(r),
        Value::Sequence(items) => items.iter().try_for_each(check_value),
        _ => Ok(()),
    }
}

fn write_document<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(256);
    if options.pretty {
        let (unit, width) = indent_unit(options)?;
        let indent = vec![unit; width];
        write_with(&mut buf, value, PrettyFormatter::with_indent(&indent))?;
    } else {
        write_with(&mut buf, value, CompactFormatter)?;
    }
    String::from_utf8(buf).map_err(Error::custom)
}

fn write_with<T, F>(buf: &mut Vec<u8>, value: &T, formatter: F) -> Result<()>
where
    T: ?Sized + Serialize,
    F: Formatter,
{
    let mut serializer = Serializer::with_formatter(buf, formatter);
    value.serialize(&mut serializer).map_err(Error::custom)
}
