use record_codec::{encode, value, FieldSpec, Format, Record, Value};

#[test]
fn test_value_macro_null() {
    assert_eq!(value!(null), Value::Null);
}

#[test]
fn test_value_macro_booleans() {
    assert_eq!(value!(true), Value::Bool(true));
    assert_eq!(value!(false), Value::Bool(false));
}

#[test]
fn test_value_macro_integers() {
    assert_eq!(value!(42), Value::Integer(42));
    assert_eq!(value!(-123), Value::Integer(-123));
    assert_eq!(value!(0), Value::Integer(0));
}

#[test]
fn test_value_macro_strings() {
    assert_eq!(value!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(value!(""), Value::String(String::new()));
}

#[test]
fn test_value_macro_sequences() {
    assert_eq!(value!([]), Value::Sequence(vec![]));
    assert_eq!(
        value!(["a", "b"]),
        Value::Sequence(vec![Value::from("a"), Value::from("b")])
    );
    assert_eq!(
        value!([[1], []]),
        Value::Sequence(vec![
            Value::Sequence(vec![Value::Integer(1)]),
            Value::Sequence(vec![])
        ])
    );
}

#[test]
fn test_value_macro_records() {
    let value = value!({
        "id": 7,
        "tags": ["x"],
        "owner": { "name": "Alice" }
    });

    let record = value.as_record().unwrap();
    assert_eq!(record.name(), "");
    assert_eq!(record.len(), 3);
    assert_eq!(record.get("owner.name"), Some(&Value::from("Alice")));
    assert!(record.fields().iter().all(|f| !f.omit_if_empty));
}

#[test]
fn test_value_macro_expressions() {
    let name = String::from("Bob");
    let count: u16 = 3;
    let value = value!({ "name": name, "count": count });
    let record = value.as_record().unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("Bob")));
    assert_eq!(record.get("count"), Some(&Value::Integer(3)));
}

#[test]
fn test_value_macro_keeps_zero_values() {
    let value = value!({ "flag": false, "count": 0, "list": [] });
    let doc = encode(value.as_record().unwrap(), Format::Json).unwrap();
    assert_eq!(doc.as_str(), r#"{"flag":false,"count":0,"list":[]}"#);
}

#[test]
fn test_value_macro_nested_in_record() {
    let record = Record::new("test").with_field(FieldSpec::new("items", value!([{ "k": "v" }])));
    let doc = encode(&record, Format::Xml).unwrap();
    assert_eq!(doc.as_str(), "<test><items><k>v</k></items></test>");
}
