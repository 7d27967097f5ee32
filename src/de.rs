//! Reading encoded documents back into records.
//!
//! Encoded text does not carry source names, omission flags or, in XML,
//! value kinds. [`decode`](crate::decode) therefore reads a document against a
//! template record: the template supplies names, flags and the expected kind
//! of every field, and the document supplies the values.
//!
//! - Fields absent from the document decode as the zero value of their
//!   template when `omit_if_empty` is set, and fail with
//!   [`Error::MissingField`] otherwise.
//! - Sequences absent from an XML document decode as empty sequences, since
//!   XML writes nothing for them.
//! - Keys or elements the template does not name are ignored.
//! - Fields whose template value is `Null` accept any value.
//!
//! ```rust
//! use record_codec::{decode, encode, FieldSpec, Format, Record};
//!
//! let record = Record::new("test")
//!     .with_field(FieldSpec::new("TestKey", 1).rename("test_key").omit_empty());
//!
//! for format in [Format::Json, Format::Xml] {
//!     let doc = encode(&record, format).unwrap();
//!     assert_eq!(decode(doc.as_str(), format, &record).unwrap(), record);
//! }
//! ```
//!
//! [`decode_value`](crate::decode_value) reads a document without a
//! template. Every record it produces has source names equal to the output
//! names, and XML leaves come back as strings.

use crate::{Error, FieldSpec, Format, Record, Result, Value};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value as JsonValue};

/// Decodes `text` against `template`.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for malformed input, [`Error::MissingField`] and
/// [`Error::TypeMismatch`] when the document does not fit the template.
pub fn decode(text: &str, format: Format, template: &Record) -> Result<Record> {
    log::debug!(
        "decoding {} document against record `{}`",
        format,
        template.name()
    );
    match format {
        Format::Json => match serde_json::from_str::<JsonValue>(text)? {
            JsonValue::Object(map) => json_record(&map, template),
            other => Err(Error::type_mismatch(
                template.name(),
                "record",
                json_kind(&other),
            )),
        },
        Format::Xml => {
            let root = parse_xml(text)?;
            if root.name != template.name() {
                return Err(Error::syntax(format!(
                    "expected root element <{}>, found <{}>",
                    template.name(),
                    root.name
                )));
            }
            xml_record(&root, template)
        }
    }
}

/// Decodes `text` without a template.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for malformed input and
/// [`Error::UnsupportedValueType`] for JSON numbers that are not `i64`.
pub fn decode_value(text: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => json_untyped(&serde_json::from_str::<JsonValue>(text)?),
        Format::Xml => Ok(xml_untyped(&parse_xml(text)?)),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn json_record(map: &Map<String, JsonValue>, template: &Record) -> Result<Record> {
    let mut out = Record::with_capacity(template.name(), template.len());
    for field in template.fields() {
        let key = field.output_name();
        let value = match map.get(key) {
            Some(json) => json_value(json, &field.value, key)?,
            None if field.omit_if_empty => field.value.zero_like(),
            None => return Err(Error::MissingField(key.to_string())),
        };
        out.push(with_value(field, value));
    }

    for key in map.keys() {
        if !template.fields().iter().any(|f| f.output_name() == key) {
            log::debug!("ignoring unknown JSON key `{}`", key);
        }
    }
    Ok(out)
}

fn json_value(json: &JsonValue, template: &Value, field: &str) -> Result<Value> {
    match (template, json) {
        (Value::Null, json) => json_untyped(json),
        (Value::Bool(_), JsonValue::Bool(b)) => Ok(Value::Bool(*b)),
        (Value::Integer(_), JsonValue::Number(n)) => n
            .as_i64()
            .map(Value::Integer)
            .ok_or_else(|| Error::type_mismatch(field, "integer", &n.to_string())),
        (Value::String(_), JsonValue::String(s)) => Ok(Value::String(s.clone())),
        (Value::Record(r), JsonValue::Object(map)) => Ok(Value::Record(json_record(map, r)?)),
        (Value::Sequence(items), JsonValue::Array(elements)) => {
            let mut out = Vec::with_capacity(elements.len());
            for (i, element) in elements.iter().enumerate() {
                let value = match element_template(items, i) {
                    Some(t) => json_value(element, t, field)?,
                    None => json_untyped(element)?,
                };
                out.push(value);
            }
            Ok(Value::Sequence(out))
        }
        (template, json) => Err(Error::type_mismatch(
            field,
            template.kind().as_str(),
            json_kind(json),
        )),
    }
}

fn json_untyped(json: &JsonValue) -> Result<Value> {
    Ok(match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => return Err(Error::unsupported_type(&format!("number {}", n))),
        },
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(elements) => Value::Sequence(
            elements
                .iter()
                .map(json_untyped)
                .collect::<Result<Vec<_>>>()?,
        ),
        JsonValue::Object(map) => {
            let mut record = Record::with_capacity("", map.len());
            for (key, value) in map {
                record.push(FieldSpec::new(key.clone(), json_untyped(value)?));
            }
            Value::Record(record)
        }
    })
}

/// Template for the `i`th element; elements past the template's end reuse
/// its last element.
fn element_template(items: &[Value], i: usize) -> Option<&Value> {
    items.get(i).or_else(|| items.last())
}

fn with_value(template: &FieldSpec, value: Value) -> FieldSpec {
    FieldSpec {
        name: template.name.clone(),
        output_name: template.output_name.clone(),
        value,
        omit_if_empty: template.omit_if_empty,
    }
}

/// Minimal element tree; attributes are not part of the encoding.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Element {
            name,
            ..Default::default()
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(Error::syntax)
}

fn parse_xml(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(Element::new(utf8(e.name().into_inner())?.to_string()));
            }
            Event::Empty(e) => {
                let element = Element::new(utf8(e.name().into_inner())?.to_string());
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::syntax("closing tag without opening tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                match stack.last_mut() {
                    Some(top) => top.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(Error::syntax("text outside the root element")),
                }
            }
            Event::CData(c) => match stack.last_mut() {
                Some(top) => top.text.push_str(utf8(&c)?),
                None => return Err(Error::syntax("CDATA outside the root element")),
            },
            Event::Eof => break,
            // declaration, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::syntax(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| Error::syntax("document has no root element"))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(Error::syntax("multiple root elements")),
        None => *root = Some(element),
    }
    Ok(())
}

fn xml_record(element: &Element, template: &Record) -> Result<Record> {
    let mut used = vec![false; element.children.len()];
    let mut out = Record::with_capacity(template.name(), template.len());

    for field in template.fields() {
        let name = field.output_name();
        let value = match &field.value {
            Value::Sequence(items) => {
                let mut values = Vec::new();
                for (i, child) in element.children.iter().enumerate() {
                    if used[i] || child.name != name {
                        continue;
                    }
                    used[i] = true;
                    let value = xml_value(child, element_template(items, values.len()), name)?;
                    values.push(value);
                }
                Value::Sequence(values)
            }
            template => {
                let position = element
                    .children
                    .iter()
                    .enumerate()
                    .position(|(i, child)| !used[i] && child.name == name);
                match position {
                    Some(i) => {
                        used[i] = true;
                        xml_value(&element.children[i], Some(template), name)?
                    }
                    None if field.omit_if_empty => template.zero_like(),
                    None => return Err(Error::MissingField(name.to_string())),
                }
            }
        };
        out.push(with_value(field, value));
    }

    for (i, child) in element.children.iter().enumerate() {
        if !used[i] {
            log::debug!(
                "ignoring unknown XML element <{}> in <{}>",
                child.name,
                element.name
            );
        }
    }
    Ok(out)
}

fn xml_value(element: &Element, template: Option<&Value>, field: &str) -> Result<Value> {
    let template = match template {
        Some(Value::Null) | None => return Ok(xml_untyped(element)),
        Some(t) => t,
    };

    if let Value::Record(r) = template {
        return Ok(Value::Record(xml_record(element, r)?));
    }
    if !element.children.is_empty() {
        return Err(Error::type_mismatch(
            field,
            template.kind().as_str(),
            "element with children",
        ));
    }

    let text = element.text.as_str();
    match template {
        Value::Bool(_) => match text.trim() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            other => Err(Error::type_mismatch(
                field,
                "boolean",
                &format!("`{}`", other),
            )),
        },
        Value::Integer(_) => text
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| Error::type_mismatch(field, "integer", &format!("`{}`", text.trim()))),
        Value::String(_) => Ok(Value::String(text.to_string())),
        other => Err(Error::type_mismatch(
            field,
            other.kind().as_str(),
            "text element",
        )),
    }
}

fn xml_untyped(element: &Element) -> Value {
    if element.children.is_empty() {
        if element.text.is_empty() {
            return Value::Null;
        }
        return Value::String(element.text.clone());
    }

    let mut record = Record::with_capacity(element.name.clone(), element.children.len());
    for child in &element.children {
        record.push(FieldSpec::new(child.name.clone(), xml_untyped(child)));
    }
    Value::Record(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Record {
        Record::new("test")
            .with_field(FieldSpec::new("Id", 0).rename("id"))
            .with_field(FieldSpec::new("Name", "").rename("name").omit_empty())
            .with_field(FieldSpec::new("Tags", vec![Value::from("")]).rename("tag"))
            .with_field(FieldSpec::new(
                "Inner",
                Record::new("inner").with_field(FieldSpec::new("Flag", false).rename("flag")),
            ))
    }

    #[test]
    fn test_json_missing_omittable_field_is_zero() {
        let record = decode(
            r#"{"id":7,"tag":["a"],"Inner":{"flag":true}}"#,
            Format::Json,
            &template(),
        )
        .unwrap();
        assert_eq!(record.get("Id"), Some(&Value::Integer(7)));
        assert_eq!(record.get("Name"), Some(&Value::String(String::new())));
        assert_eq!(record.get("Inner.Flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_json_missing_required_field() {
        let err = decode(r#"{"tag":[],"Inner":{"flag":true}}"#, Format::Json, &template())
            .unwrap_err();
        assert_eq!(err, Error::MissingField("id".to_string()));
    }

    #[test]
    fn test_json_type_mismatch() {
        let err = decode(
            r#"{"id":"7","tag":[],"Inner":{"flag":true}}"#,
            Format::Json,
            &template(),
        )
        .unwrap_err();
        assert_eq!(err, Error::type_mismatch("id", "integer", "string"));
    }

    #[test]
    fn test_json_syntax_error() {
        assert!(matches!(
            decode("{", Format::Json, &template()),
            Err(Error::Syntax(_))
        ));
    }

    #[test]
    fn test_xml_sequences_and_unknown_elements() {
        let xml = "<test>\n  <id>3</id>\n  <tag>a</tag>\n  <extra>x</extra>\n  <tag>b</tag>\n  <Inner><flag>false</flag></Inner>\n</test>";
        let record = decode(xml, Format::Xml, &template()).unwrap();
        assert_eq!(
            record.get("Tags"),
            Some(&Value::Sequence(vec![Value::from("a"), Value::from("b")]))
        );
        assert_eq!(record.get("Inner.Flag"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_xml_missing_sequence_is_empty() {
        let xml = "<test><id>3</id><Inner><flag>1</flag></Inner></test>";
        let record = decode(xml, Format::Xml, &template()).unwrap();
        assert_eq!(record.get("Tags"), Some(&Value::Sequence(vec![])));
        assert_eq!(record.get("Inner.Flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_xml_wrong_root() {
        let err = decode("<other></other>", Format::Xml, &template()).unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
    }

    #[test]
    fn test_xml_malformed() {
        assert!(decode("<test><id>1</test>", Format::Xml, &template()).is_err());
        assert!(decode("<test>", Format::Xml, &template()).is_err());
        assert!(decode("", Format::Xml, &template()).is_err());
    }

    #[test]
    fn test_xml_bad_integer() {
        let xml = "<test><id>seven</id><Inner><flag>1</flag></Inner></test>";
        let err = decode(xml, Format::Xml, &template()).unwrap_err();
        assert_eq!(err, Error::type_mismatch("id", "integer", "`seven`"));
    }

    #[test]
    fn test_xml_unescapes_text() {
        let template = Record::new("r").with_field(FieldSpec::new("s", ""));
        let record = decode("<r><s>&lt;a &amp; b&gt;</s></r>", Format::Xml, &template).unwrap();
        assert_eq!(record.get("s"), Some(&Value::from("<a & b>")));
    }

    #[test]
    fn test_decode_value_untyped() {
        let value = decode_value(r#"{"a":1,"b":[true,null]}"#, Format::Json).unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(
            record.get("b"),
            Some(&Value::Sequence(vec![Value::Bool(true), Value::Null]))
        );

        let value = decode_value("<r><a>1</a><b/></r>", Format::Xml).unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.name(), "r");
        assert_eq!(record.get("a"), Some(&Value::from("1")));
        assert_eq!(record.get("b"), Some(&Value::Null));
    }
}
