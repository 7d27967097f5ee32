//! Declaring output names and omission once, then encoding Rust structs.
//!
//! Run with: cargo run --example tag_tables

use record_codec::{decode, encode, to_record, FieldMap, Format, Schema};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Server {
    host: String,
    port: u16,
    tls: bool,
}

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    servers: Vec<Server>,
    admin_email: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let schema = Schema::new()
        .with(
            "Config",
            FieldMap::new()
                .tag("servers", "server,omitempty")?
                .tag("admin_email", "admin,omitempty")?,
        )
        .with("Server", FieldMap::new().tag("tls", ",omitempty")?);

    let config = Config {
        name: "edge".to_string(),
        servers: vec![
            Server {
                host: "a.example.com".to_string(),
                port: 443,
                tls: true,
            },
            Server {
                host: "b.example.com".to_string(),
                port: 80,
                tls: false,
            },
        ],
        admin_email: None,
    };

    let record = to_record(&config, &schema)?;

    let json = encode(&record, Format::Json)?;
    let xml = encode(&record, Format::Xml)?;
    println!("JSON: {}", json);
    println!("XML:  {}", xml);

    // The record doubles as the template for reading the documents back
    let from_xml = decode(xml.as_str(), Format::Xml, &record)?;
    println!("\nDecoded from XML matches: {}", from_xml == record);

    Ok(())
}
