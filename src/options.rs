//! Configuration options for record encoding.
//!
//! This module provides types to pick and shape the output format:
//!
//! - [`Format`]: the target text format (JSON or XML)
//! - [`EncodeOptions`]: indentation and XML declaration settings
//!
//! ## Examples
//!
//! ```rust
//! use record_codec::{encode_with_options, EncodeOptions, FieldSpec, Format, Record};
//!
//! let record = Record::new("point")
//!     .with_field(FieldSpec::new("X", 1).rename("x"))
//!     .with_field(FieldSpec::new("Y", 2).rename("y"));
//!
//! // Compact output
//! let doc = encode_with_options(&record, Format::Json, &EncodeOptions::new()).unwrap();
//! assert_eq!(doc.as_str(), r#"{"x":1,"y":2}"#);
//!
//! // Pretty output with a tab indent
//! let options = EncodeOptions::new().with_indent("\t");
//! let doc = encode_with_options(&record, Format::Json, &options).unwrap();
//! assert_eq!(doc.as_str(), "{\n\t\"x\": 1,\n\t\"y\": 2\n}");
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Target text format.
///
/// # Examples
///
/// ```rust
/// use record_codec::Format;
///
/// assert_eq!(Format::Json.as_str(), "json");
/// assert_eq!("XML".parse::<Format>().unwrap(), Format::Xml);
/// assert!("yaml".parse::<Format>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    /// Returns the lowercase name of this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    /// Returns `true` if sibling fields must have distinct output names.
    ///
    /// JSON objects forbid duplicate keys; XML allows repeated elements.
    #[must_use]
    pub const fn forbids_duplicate_names(&self) -> bool {
        matches!(self, Format::Json)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Xml => f.write_str("XML"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Configuration options for encoding.
///
/// Controls whether nested structure is laid out on separate lines, which
/// string is used for one level of indentation, and whether XML output
/// starts with an XML declaration.
///
/// # Examples
///
/// ```rust
/// use record_codec::EncodeOptions;
///
/// // Default compact options
/// let options = EncodeOptions::new();
/// assert!(!options.pretty);
///
/// // Pretty-printed with 2-space indentation
/// let options = EncodeOptions::pretty();
/// assert_eq!(options.indent, "  ");
///
/// // Custom configuration
/// let options = EncodeOptions::new()
///     .with_indent("    ")
///     .with_xml_declaration(true);
/// assert!(options.pretty);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeOptions {
    pub indent: String,
    pub pretty: bool,
    pub xml_declaration: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: "  ".to_string(),
            pretty: false,
            xml_declaration: false,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (compact output, two-space indent when pretty).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with newlines and indentation.
    #[must_use]
    pub fn pretty() -> Self {
        EncodeOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the string written once per nesting level, and turns on
    /// pretty-printing.
    ///
    /// The indent must be a run of spaces or a run of tabs; encoding fails
    /// with [`Error::InvalidIndent`] otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_codec::EncodeOptions;
    ///
    /// let options = EncodeOptions::new().with_indent("\t");
    /// assert!(options.pretty);
    /// assert_eq!(options.indent, "\t");
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self.pretty = true;
        self
    }

    /// Prepends `<?xml version="1.0" encoding="UTF-8"?>` to XML output.
    ///
    /// Has no effect on JSON output.
    #[must_use]
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }
}
