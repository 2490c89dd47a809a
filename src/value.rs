//! The typed value model that canonical Extended JSON is generated from.
//!
//! This module provides the [`Bson`] enum, a closed union over every kind of the binary
//! document model, together with the small payload types some kinds carry.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use canonical_extjson::{Bson, Binary, Timestamp};
//!
//! let int = Bson::from(42);
//! let long = Bson::from(42i64);
//! let text = Bson::from("hello");
//! let ts = Bson::Timestamp(Timestamp { time: 1, increment: 2 });
//! let bin = Bson::Binary(Binary { subtype: 0x00, bytes: vec![1, 2, 3] });
//!
//! assert!(int.is_int32());
//! assert!(!long.is_int32());
//! assert_eq!(text.as_str(), Some("hello"));
//! ```
//!
//! ### Converting Dates
//!
//! ```rust
//! use canonical_extjson::DateTime;
//! use chrono::{TimeZone, Utc};
//!
//! let when = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! assert_eq!(DateTime::from(when).timestamp_millis(), 1_577_836_800_000);
//! ```

use crate::{Decimal128, Document, ObjectId};

/// A value of the binary document model.
///
/// Every variant maps to exactly one canonical Extended JSON encoding, so the original kind
/// is recoverable from the text alone.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Bson {
    Double(f64),
    String(String),
    Document(Document),
    Array(Vec<Bson>),
    Binary(Binary),
    Undefined,
    ObjectId(ObjectId),
    Boolean(bool),
    DateTime(DateTime),
    #[default]
    Null,
    RegularExpression(Regex),
    DbPointer(DbPointer),
    JavaScriptCode(String),
    Symbol(String),
    JavaScriptCodeWithScope(CodeWithScope),
    Int32(i32),
    Timestamp(Timestamp),
    Int64(i64),
    Decimal128(Decimal128),
    MinKey,
    MaxKey,
}

/// Milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime(i64);

impl DateTime {
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        DateTime(millis)
    }

    #[must_use]
    pub const fn timestamp_millis(&self) -> i64 {
        self.0
    }
}

impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for DateTime {
    fn from(value: chrono::DateTime<Tz>) -> Self {
        DateTime(value.timestamp_millis())
    }
}

/// Replication timestamp: seconds plus an ordinal within that second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    pub time: u32,
    pub increment: u32,
}

/// Raw bytes tagged with a one-byte subtype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
    pub subtype: u8,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regex {
    pub pattern: String,
    pub options: String,
}

/// A reference to a document in another collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbPointer {
    pub namespace: String,
    pub id: ObjectId,
}

/// Code together with the variable bindings it captured.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeWithScope {
    pub code: String,
    pub scope: Document,
}

impl Bson {
    /// Returns the kind name used in diagnostics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use canonical_extjson::Bson;
    ///
    /// assert_eq!(Bson::Int64(1).kind_name(), "int64");
    /// assert_eq!(Bson::MinKey.kind_name(), "minKey");
    /// ```
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Bson::Double(_) => "double",
            Bson::String(_) => "string",
            Bson::Document(_) => "document",
            Bson::Array(_) => "array",
            Bson::Binary(_) => "binData",
            Bson::Undefined => "undefined",
            Bson::ObjectId(_) => "objectId",
            Bson::Boolean(_) => "bool",
            Bson::DateTime(_) => "date",
            Bson::Null => "null",
            Bson::RegularExpression(_) => "regex",
            Bson::DbPointer(_) => "dbPointer",
            Bson::JavaScriptCode(_) => "javascript",
            Bson::Symbol(_) => "symbol",
            Bson::JavaScriptCodeWithScope(_) => "javascriptWithScope",
            Bson::Int32(_) => "int",
            Bson::Timestamp(_) => "timestamp",
            Bson::Int64(_) => "int64",
            Bson::Decimal128(_) => "decimal",
            Bson::MinKey => "minKey",
            Bson::MaxKey => "maxKey",
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Bson::Null)
    }

    /// Returns `true` if the value is a 32-bit integer.
    #[inline]
    #[must_use]
    pub const fn is_int32(&self) -> bool {
        matches!(self, Bson::Int32(_))
    }

    /// Returns `true` for documents and arrays.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Bson::Document(_) | Bson::Array(_))
    }

    /// If the value is a plain string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Bson::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Bson::Document(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<bool> for Bson {
    fn from(value: bool) -> Self {
        Bson::Boolean(value)
    }
}

impl From<i32> for Bson {
    fn from(value: i32) -> Self {
        Bson::Int32(value)
    }
}

impl From<i64> for Bson {
    fn from(value: i64) -> Self {
        Bson::Int64(value)
    }
}

impl From<f64> for Bson {
    fn from(value: f64) -> Self {
        Bson::Double(value)
    }
}

impl From<f32> for Bson {
    fn from(value: f32) -> Self {
        Bson::Double(f64::from(value))
    }
}

impl From<String> for Bson {
    fn from(value: String) -> Self {
        Bson::String(value)
    }
}

impl From<&str> for Bson {
    fn from(value: &str) -> Self {
        Bson::String(value.to_string())
    }
}

impl From<Vec<Bson>> for Bson {
    fn from(value: Vec<Bson>) -> Self {
        Bson::Array(value)
    }
}

impl From<Document> for Bson {
    fn from(value: Document) -> Self {
        Bson::Document(value)
    }
}

impl From<ObjectId> for Bson {
    fn from(value: ObjectId) -> Self {
        Bson::ObjectId(value)
    }
}

impl From<Decimal128> for Bson {
    fn from(value: Decimal128) -> Self {
        Bson::Decimal128(value)
    }
}

impl From<DateTime> for Bson {
    fn from(value: DateTime) -> Self {
        Bson::DateTime(value)
    }
}

impl From<Timestamp> for Bson {
    fn from(value: Timestamp) -> Self {
        Bson::Timestamp(value)
    }
}

impl From<Binary> for Bson {
    fn from(value: Binary) -> Self {
        Bson::Binary(value)
    }
}

impl From<Regex> for Bson {
    fn from(value: Regex) -> Self {
        Bson::RegularExpression(value)
    }
}

impl From<CodeWithScope> for Bson {
    fn from(value: CodeWithScope) -> Self {
        Bson::JavaScriptCodeWithScope(value)
    }
}

impl<T: Into<Bson>> From<Option<T>> for Bson {
    fn from(value: Option<T>) -> Self {
        value.map_or(Bson::Null, Into::into)
    }
}
