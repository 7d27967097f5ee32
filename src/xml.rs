//! XML output.
//!
//! The root record becomes an element named after the record. Each retained
//! field becomes a child element named by its output name. Sequences expand
//! into repeated sibling elements that share the field's name, so an empty
//! sequence produces no element at all.
//!
//! ```rust
//! use record_codec::{encode, FieldSpec, Format, Record, Value};
//!
//! let record = Record::new("party")
//!     .with_field(FieldSpec::new("Guests", vec![Value::from("Bilbo"), Value::from("Frodo")]).rename("guest"));
//!
//! assert_eq!(
//!     encode(&record, Format::Xml).unwrap().as_str(),
//!     "<party><guest>Bilbo</guest><guest>Frodo</guest></party>"
//! );
//! ```
//!
//! Only records can sit at the document root, and a sequence cannot contain
//! another sequence directly because the inner level would have no element
//! name.

use crate::encoder::{ensure_unique_names, indent_unit, retained, Encode};
use crate::{EncodeOptions, Error, FieldSpec, Format, Record, Result, Value};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;

type XmlWriter = Writer<Vec<u8>>;

/// Encodes records as XML elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlEncoder;

impl Encode for XmlEncoder {
    fn name(&self) -> &'static str {
        "XML"
    }

    fn encode_record(&self, record: &Record, options: &EncodeOptions) -> Result<String> {
        if record.name().is_empty() {
            return Err(Error::unsupported_type(
                "record without an element name at XML document root",
            ));
        }
        ensure_valid_name(record.name())?;

        let buf = Vec::with_capacity(256);
        let mut writer = if options.pretty {
            let (unit, width) = indent_unit(options)?;
            Writer::new_with_indent(buf, unit, width)
        } else {
            Writer::new(buf)
        };

        if options.xml_declaration {
            emit(
                &mut writer,
                Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
            )?;
            // the indenting writer breaks the line itself
            if !options.pretty {
                writer.get_mut().push(b'\n');
            }
        }
        write_record(&mut writer, record.name(), record)?;
        String::from_utf8(writer.into_inner()).map_err(Error::custom)
    }
}

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::io(&e.to_string()))
}

fn write_record(writer: &mut XmlWriter, name: &str, record: &Record) -> Result<()> {
    // empty sequences write no elements
    let fields: Vec<_> = retained(record)
        .into_iter()
        .filter(|f| !matches!(&f.value, Value::Sequence(items) if items.is_empty()))
        .collect();
    ensure_unique_names(&fields, Format::Xml)?;

    emit(writer, Event::Start(BytesStart::new(name)))?;
    if fields.is_empty() {
        write_text(writer, "")?;
    }
    for field in fields {
        write_field(writer, field)?;
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn write_field(writer: &mut XmlWriter, field: &FieldSpec) -> Result<()> {
    let name = field.output_name();
    ensure_valid_name(name)?;

    match &field.value {
        Value::Sequence(elements) => {
            for element in elements {
                if element.is_sequence() {
                    return Err(Error::unsupported_type(&format!(
                        "sequence nested in sequence `{}` in XML",
                        name
                    )));
                }
                write_element(writer, name, element)?;
            }
            Ok(())
        }
        value => write_element(writer, name, value),
    }
}

fn write_element(writer: &mut XmlWriter, name: &str, value: &Value) -> Result<()> {
    let text = match value {
        Value::Record(r) => return write_record(writer, name, r),
        Value::Sequence(_) => {
            return Err(Error::unsupported_type(&format!(
                "sequence as a single XML element `{}`",
                name
            )))
        }
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Integer(i) => Cow::Owned(i.to_string()),
        Value::String(s) => Cow::Borrowed(s.as_str()),
    };

    emit(writer, Event::Start(BytesStart::new(name)))?;
    // an empty text event keeps the closing tag on the same line
    write_text(writer, &text)?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn write_text(writer: &mut XmlWriter, text: &str) -> Result<()> {
    if let Some(c) = text
        .chars()
        .find(|c| c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r' | '\u{7f}'))
    {
        return Err(Error::unsupported_type(&format!(
            "control character U+{:04X} in XML text",
            c as u32
        )));
    }

    let escaped = escape(text);
    // keep carriage returns from being normalized away by readers
    let escaped = if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#xD;"))
    } else {
        escaped
    };
    emit(writer, Event::Text(BytesText::from_escaped(escaped)))
}

/// Checks that `name` can be used as an unprefixed element name.
///
/// Names starting with `xml` in any case are reserved.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    if name.len() >= 3 && name.as_bytes()[..3].eq_ignore_ascii_case(b"xml") {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn ensure_valid_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::invalid_name(name, "XML"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(record: &Record) -> Result<String> {
        XmlEncoder.encode_record(record, &EncodeOptions::new())
    }

    #[test]
    fn test_omitted_zero_leaves_empty_element() {
        let record = Record::new("test")
            .with_field(FieldSpec::new("TestKey", 0).rename("test_key").omit_empty());
        assert_eq!(compact(&record).unwrap(), "<test></test>");
    }

    #[test]
    fn test_non_zero_is_emitted() {
        let record = Record::new("test")
            .with_field(FieldSpec::new("TestKey", 1).rename("test_key").omit_empty());
        assert_eq!(
            compact(&record).unwrap(),
            "<test><test_key>1</test_key></test>"
        );
    }

    #[test]
    fn test_pretty_nested() {
        let record = Record::new("outer")
            .with_field(FieldSpec::new(
                "inner",
                Record::new("ignored").with_field(FieldSpec::new("flag", true)),
            ))
            .with_field(FieldSpec::new("n", vec![Value::from(1), Value::from(2)]))
            .with_field(FieldSpec::new("gap", Value::Null));
        let xml = XmlEncoder
            .encode_record(&record, &EncodeOptions::pretty())
            .unwrap();
        assert_eq!(
            xml,
            "<outer>\n  <inner>\n    <flag>true</flag>\n  </inner>\n  <n>1</n>\n  <n>2</n>\n  <gap></gap>\n</outer>"
        );
    }

    #[test]
    fn test_empty_sequence_emits_nothing() {
        let record = Record::new("r").with_field(FieldSpec::new("items", Vec::<Value>::new()));
        assert_eq!(compact(&record).unwrap(), "<r></r>");

        let pretty = XmlEncoder
            .encode_record(&record, &EncodeOptions::pretty())
            .unwrap();
        assert_eq!(pretty, "<r></r>");
    }

    #[test]
    fn test_text_escaping() {
        let record = Record::new("r").with_field(FieldSpec::new("s", "<a & 'b'>\r"));
        assert_eq!(
            compact(&record).unwrap(),
            "<r><s>&lt;a &amp; &apos;b&apos;&gt;&#xD;</s></r>"
        );
    }

    #[test]
    fn test_declaration() {
        let record = Record::new("r");
        let options = EncodeOptions::new().with_xml_declaration(true);
        assert_eq!(
            XmlEncoder.encode_record(&record, &options).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<r></r>"
        );

        let record = Record::new("r").with_field(FieldSpec::new("a", 1));
        let options = EncodeOptions::pretty().with_xml_declaration(true);
        assert_eq!(
            XmlEncoder.encode_record(&record, &options).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<r>\n  <a>1</a>\n</r>"
        );
    }

    #[test]
    fn test_control_characters_rejected() {
        let record = Record::new("r").with_field(FieldSpec::new("s", "a\u{1}b"));
        assert_eq!(
            compact(&record),
            Err(Error::unsupported_type("control character U+0001 in XML text"))
        );

        let record = Record::new("r").with_field(FieldSpec::new("s", "tab\tline\n\u{7f}"));
        assert_eq!(compact(&record).unwrap(), "<r><s>tab\tline\n\u{7f}</s></r>");
    }

    #[test]
    fn test_indent_must_be_whitespace() {
        let record = Record::new("r").with_field(FieldSpec::new("a", 1));
        let err = XmlEncoder
            .encode_record(&record, &EncodeOptions::new().with_indent("->"))
            .unwrap_err();
        assert_eq!(err, Error::InvalidIndent("->".to_string()));

        let xml = XmlEncoder
            .encode_record(&record, &EncodeOptions::new().with_indent("\t"))
            .unwrap();
        assert_eq!(xml, "<r>\n\t<a>1</a>\n</r>");
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let record = Record::new("r")
            .with_field(FieldSpec::new("A", 1).rename("k"))
            .with_field(FieldSpec::new("B", 2).rename("k"));
        assert_eq!(compact(&record).unwrap(), "<r><k>1</k><k>2</k></r>");
    }

    #[test]
    fn test_scalar_root_rejected() {
        let err = XmlEncoder
            .encode_value(&Value::from(true), &EncodeOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueType(_)));
    }

    #[test]
    fn test_unnamed_root_rejected() {
        assert!(matches!(
            compact(&Record::new("")),
            Err(Error::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_nested_sequence_rejected() {
        let record = Record::new("r").with_field(FieldSpec::new(
            "grid",
            vec![Value::from(vec![Value::from(1)])],
        ));
        assert!(matches!(
            compact(&record),
            Err(Error::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_invalid_names() {
        assert!(is_valid_name("test_key"));
        assert!(is_valid_name("_a.b-c1"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1st"));
        assert!(!is_valid_name("has space"));
        assert!(!is_valid_name("xmlroot"));
        assert!(!is_valid_name("XML"));
        assert!(!is_valid_name("XmL_data"));
        assert!(is_valid_name("xm"));
        assert!(is_valid_name("axml"));

        let record = Record::new("r").with_field(FieldSpec::new("x", 1).rename("bad name"));
        assert_eq!(
            compact(&record),
            Err(Error::invalid_name("bad name", "XML"))
        );

        assert_eq!(
            compact(&Record::new("xmlroot")),
            Err(Error::invalid_name("xmlroot", "XML"))
        );
    }
}
