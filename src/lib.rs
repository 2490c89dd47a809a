//! # canonical_extjson
//!
//! Generates canonical Extended JSON v2 from values of a typed, BSON-like document model.
//!
//! ## Why canonical Extended JSON?
//!
//! Plain JSON loses type information: `123` could have been a 32-bit integer, a 64-bit
//! integer, or a double. Canonical Extended JSON wraps every value that plain JSON cannot
//! describe in a tagging object, so a reader recovers the exact original kind without any
//! external schema:
//!
//! | Kind | Canonical form |
//! |------|----------------|
//! | Int32 | `{"$numberInt":"5"}` |
//! | Int64 | `{"$numberLong":"5"}` |
//! | Double | `{"$numberDouble":"5"}`, `"NaN"`, `"Infinity"`, `"-Infinity"` |
//! | Decimal128 | `{"$numberDecimal":"5.0"}` |
//! | Date | `{"$date":{"$numberLong":"1590972160292"}}` |
//! | ObjectId | `{"$oid":"507f1f77bcf86cd799439011"}` |
//! | Binary | `{"$binary":{"base64":"AQI=","subType":"00"}}` |
//! | Regex | `{"$regularExpression":{"pattern":"^a","options":"i"}}` |
//! | Timestamp | `{"$timestamp":{"t":1,"i":2}}` |
//! | Symbol | `{"$symbol":"s"}` |
//! | Code | `{"$code":"f()"}` |
//! | Code with scope | `{"$code":"f()","$scope":{...}}` |
//! | DBPointer | `{"$ref":"coll","$id":"507f1f77bcf86cd799439011"}` |
//! | MinKey / MaxKey | `{"$minKey":1}` / `{"$maxKey":1}` |
//! | Undefined | `{"$undefined":true}` |
//! | String, Boolean, Null | plain JSON |
//!
//! Output is always single-line, with fields in insertion order.
//!
//! ## Quick Start
//!
//! ```rust
//! use canonical_extjson::{doc, to_string, Bson, ObjectId};
//!
//! let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
//! let mut user = doc!({ "name": "Alice", "age": 30, "score": 9.5 });
//! user.insert("_id", id);
//! user.insert("visits", Bson::Int64(12));
//!
//! let json = to_string(&user).unwrap();
//! assert_eq!(
//!     json,
//!     concat!(
//!         r#"{"name":"Alice","age":{"$numberInt":"30"},"score":{"$numberDouble":"9.5"},"#,
//!         r#""_id":{"$oid":"507f1f77bcf86cd799439011"},"visits":{"$numberLong":"12"}}"#
//!     )
//! );
//! ```
//!
//! ## Limits
//!
//! Documents, arrays, and code-with-scope values may nest at most
//! [`ExtJsonOptions::max_depth`] levels deep (default [`DEFAULT_MAX_DEPTH`]); deeper input
//! fails with [`Error::DepthExceeded`] instead of exhausting the stack.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Generation is a pure function of the input: no global state, safe to run on many
//!   threads at once
//! - Failed serializations never hand back partial output

pub mod decimal128;
pub mod document;
pub mod error;
pub mod escape;
pub mod macros;
pub mod oid;
pub mod options;
pub mod ser;
pub mod value;

pub use decimal128::Decimal128;
pub use document::Document;
pub use error::{Error, Result};
pub use oid::ObjectId;
pub use options::{ExtJsonOptions, DEFAULT_MAX_DEPTH};
pub use ser::{write_document, write_value, CanonicalGenerator, Generator, Serializer};
pub use value::{Binary, Bson, CodeWithScope, DateTime, DbPointer, Regex, Timestamp};

use std::io;

/// Serialize a document to a canonical Extended JSON string.
///
/// # Examples
///
/// ```rust
/// use canonical_extjson::{doc, to_string};
///
/// let json = to_string(&doc!({ "x": 1 })).unwrap();
/// assert_eq!(json, r#"{"x":{"$numberInt":"1"}}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the document nests deeper than the default limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(doc: &Document) -> Result<String> {
    to_string_with_options(doc, &ExtJsonOptions::default())
}

/// Serialize a document to a canonical Extended JSON string with custom options.
///
/// # Errors
///
/// Returns an error if the document nests deeper than `options.max_depth`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(doc: &Document, options: &ExtJsonOptions) -> Result<String> {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize_document(doc)?;
    Ok(serializer.into_inner())
}

/// Serialize a single value, at the top level, to canonical Extended JSON.
///
/// A document or array value is treated as the top level (depth 0).
///
/// # Examples
///
/// ```rust
/// use canonical_extjson::{value_to_string, Bson};
///
/// assert_eq!(value_to_string(&Bson::Double(f64::NAN)).unwrap(), r#"{"$numberDouble":"NaN"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value nests deeper than the default limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn value_to_string(value: &Bson) -> Result<String> {
    let mut serializer = Serializer::new(ExtJsonOptions::default());
    serializer.serialize_value(value)?;
    Ok(serializer.into_inner())
}

/// Serialize a document to canonical Extended JSON bytes.
///
/// # Errors
///
/// Returns an error if the document nests deeper than the default limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(doc: &Document) -> Result<Vec<u8>> {
    to_string(doc).map(String::into_bytes)
}

/// Serialize a document to a writer as canonical Extended JSON.
///
/// # Examples
///
/// ```rust
/// use canonical_extjson::{doc, to_writer};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &doc!({ "ok": true })).unwrap();
/// assert_eq!(buffer, br#"{"ok":true}"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails. Nothing is
/// written when serialization fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, doc: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, doc, &ExtJsonOptions::default())
}

/// Serialize a document to a writer as canonical Extended JSON with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(
    mut writer: W,
    doc: &Document,
    options: &ExtJsonOptions,
) -> Result<()>
where
    W: io::Write,
{
    let json = to_string_with_options(doc, options)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}
