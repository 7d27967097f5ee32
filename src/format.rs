//! Output format reference
//!
//! This module documents exactly what the encoders emit. It contains no code.
//!
//! # Field presence
//!
//! A field appears in the output unless **both** hold:
//!
//! - its `omit_if_empty` flag is set, and
//! - its value is the zero value of its kind.
//!
//! | Kind | Zero value |
//! |------|------------|
//! | Null | `Null` |
//! | Boolean | `false` |
//! | Integer | `0` |
//! | String | `""` |
//! | Record | a record with no fields |
//! | Sequence | an empty sequence |
//!
//! A record whose fields are all omitted is not itself empty: it still has
//! fields, so it is emitted (as `{}` or an empty element).
//!
//! Retained fields keep their declared order. A field is written under its
//! output name, or under its source name when no output name is set.
//!
//! # JSON
//!
//! | Value | Output |
//! |-------|--------|
//! | Null | `null` |
//! | Boolean | `true` / `false` |
//! | Integer | decimal digits, optional `-` |
//! | String | quoted; `"` `\` and control characters escaped |
//! | Record | object keyed by output name |
//! | Sequence | array |
//!
//! Compact output has no whitespace at all:
//!
//! ```text
//! {"id":1,"tags":["a","b"]}
//! ```
//!
//! Pretty output puts every member and element on its own line, indents one
//! indent string per level, and writes `": "` between key and value. Empty
//! objects and arrays stay on one line:
//!
//! ```text
//! {
//!   "id": 1,
//!   "tags": [
//!     "a",
//!     "b"
//!   ],
//!   "meta": {}
//! }
//! ```
//!
//! Two retained sibling fields with the same output name are rejected with
//! `DuplicateOutputName`. Omitted fields do not take part in this check.
//!
//! Any value may be the document root.
//!
//! # XML
//!
//! | Value | Output for field `f` |
//! |-------|--------|
//! | Null | `<f></f>` |
//! | Boolean | `<f>true</f>` |
//! | Integer | `<f>42</f>` |
//! | String | `<f>text</f>`, with `& < > " '` and carriage return escaped |
//! | Record | `<f>` children `</f>` (the nested record's own name is not used) |
//! | Sequence | one `<f>` element per item; nothing when empty |
//!
//! The document root must be a record with a non-empty name, which becomes
//! the root element:
//!
//! ```text
//! <test><test_key>1</test_key></test>
//! ```
//!
//! Pretty output puts each child element on its own line:
//!
//! ```text
//! <test>
//!   <test_key>1</test_key>
//!   <tag>a</tag>
//!   <tag>b</tag>
//! </test>
//! ```
//!
//! Element names must start with a letter or `_` and contain only letters,
//! digits, `_`, `-` and `.`; anything else fails with `InvalidName`. Repeated
//! sibling names are allowed. A sequence directly inside a sequence has no
//! element name and fails with `UnsupportedValueType`, as does a non-record
//! root. Names beginning with `xml` in any letter case are reserved and fail
//! with `InvalidName`. Control characters other than tab, newline and
//! carriage return cannot appear in XML 1.0 text; a string holding one fails
//! with `UnsupportedValueType`.
//!
//! # Indentation
//!
//! Pretty output indents with the options' indent string, which must be a run
//! of spaces or a run of tabs (or empty). Anything else fails with
//! `InvalidIndent`, since it would end up inside the document.
//!
//! With `with_xml_declaration(true)` the document starts with
//! `<?xml version="1.0" encoding="UTF-8"?>` followed by a newline.
