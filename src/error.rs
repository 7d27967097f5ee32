//! Error types for record encoding and decoding.
//!
//! Every failure is reported through the single [`Error`] enum. Encoding
//! errors are detected during the tree walk and abort it before any output
//! is handed back, so a caller either gets a whole document or an error.
//!
//! ## Error Categories
//!
//! - **Representation**: a value has no form in the target format
//!   ([`Error::UnsupportedValueType`], [`Error::InvalidName`])
//! - **Naming**: two retained sibling fields share an output name in a format
//!   that forbids it ([`Error::DuplicateOutputName`])
//! - **Options**: an indent that is not spaces or tabs
//!   ([`Error::InvalidIndent`])
//! - **Tables and paths**: malformed tag strings or field paths
//! - **Decoding**: syntax errors, missing fields and kind mismatches
//!
//! ## Examples
//!
//! ```rust
//! use record_codec::{encode, Error, FieldSpec, Format, Record};
//!
//! let record = Record::new("test")
//!     .with_field(FieldSpec::new("A", 1).rename("same"))
//!     .with_field(FieldSpec::new("B", 2).rename("same"));
//!
//! let err = encode(&record, Format::Json).unwrap_err();
//! assert!(matches!(err, Error::DuplicateOutputName { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value kind has no representation in the target format.
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// Two retained sibling fields resolve to the same output name.
    #[error("Duplicate output name `{name}` in {format}")]
    DuplicateOutputName { name: String, format: String },

    /// An output name cannot be used as an element name in the target format.
    #[error("Invalid {format} name: `{name}`")]
    InvalidName { name: String, format: String },

    /// A dotted field path does not resolve inside the record.
    #[error("Invalid field path `{path}`: {msg}")]
    InvalidPath { path: String, msg: String },

    /// A field tag string could not be parsed.
    #[error("Invalid field tag `{tag}`: {msg}")]
    InvalidTag { tag: String, msg: String },

    /// A format name that this crate does not know.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A pretty-printing indent that is not one space or tab repeated.
    #[error("Invalid indent {0:?}: expected a run of spaces or a run of tabs")]
    InvalidIndent(String),

    /// A non-omittable field is absent from the decoded document.
    #[error("Missing field `{0}`")]
    MissingField(String),

    /// A decoded value does not match the kind the template expects.
    #[error("Type mismatch for `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// The decoder input is not well-formed for its format.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported value type error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_codec::Error;
    ///
    /// let err = Error::unsupported_type("float");
    /// assert!(err.to_string().contains("float"));
    /// ```
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedValueType(msg.to_string())
    }

    /// Creates a duplicate output name error for the given format.
    pub fn duplicate_output_name(name: &str, format: &str) -> Self {
        Error::DuplicateOutputName {
            name: name.to_string(),
            format: format.to_string(),
        }
    }

    /// Creates an invalid element name error.
    pub fn invalid_name(name: &str, format: &str) -> Self {
        Error::InvalidName {
            name: name.to_string(),
            format: format.to_string(),
        }
    }

    /// Creates an invalid path error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_codec::Error;
    ///
    /// let err = Error::invalid_path("Outer.Missing", "no field `Missing`");
    /// assert!(err.to_string().contains("Outer.Missing"));
    /// ```
    pub fn invalid_path(path: &str, msg: &str) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid tag error.
    pub fn invalid_tag(tag: &str, msg: &str) -> Self {
        Error::InvalidTag {
            tag: tag.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a type mismatch error raised while decoding `field`.
    pub fn type_mismatch(field: &str, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a syntax error for malformed decoder input.
    pub fn syntax<T: fmt::Display>(msg: T) -> Self {
        Error::Syntax(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Syntax(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Syntax(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
