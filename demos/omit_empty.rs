//! Presence-based omission in JSON and XML.
//!
//! Run with: cargo run --example omit_empty

use record_codec::{encode, encode_with_options, EncodeOptions, FieldSpec, Format, Record, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut record = Record::new("test")
        .with_field(FieldSpec::new("TestKey", false).rename("test_key").omit_empty())
        .with_field(FieldSpec::new("Count", 0).rename("count").omit_empty())
        .with_field(FieldSpec::new("Label", "").rename("label"));

    // Flagged zero values disappear, unflagged ones stay
    println!("All zero:");
    println!("  JSON: {}", encode(&record, Format::Json)?);
    println!("  XML:  {}\n", encode(&record, Format::Xml)?);

    record.set("TestKey", true)?;
    record.set("Count", 3)?;

    println!("After setting TestKey and Count:");
    println!("  JSON: {}", encode(&record, Format::Json)?);
    println!("  XML:  {}\n", encode(&record, Format::Xml)?);

    let tags = vec![Value::from("red"), Value::from("blue")];
    record.push(FieldSpec::new("Tags", tags).rename("tag"));

    let options = EncodeOptions::pretty().with_xml_declaration(true);
    println!("Pretty JSON:\n{}\n", encode_with_options(&record, Format::Json, &options)?);
    println!("Pretty XML:\n{}", encode_with_options(&record, Format::Xml, &options)?);

    Ok(())
}
