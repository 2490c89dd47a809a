//! Error types for canonical Extended JSON generation.
//!
//! Generation is almost entirely infallible. The few failure paths are:
//!
//! - **Depth exceeded**: a document, array, or code-with-scope chain nests deeper than
//!   [`ExtJsonOptions::max_depth`](crate::ExtJsonOptions::max_depth)
//! - **Unrepresentable number**: a finite double outside the legal finite range, which
//!   indicates a broken upstream decoder and cannot happen for real IEEE-754 values
//! - **I/O errors**: the sink passed to [`to_writer`](crate::to_writer) refused the bytes
//!
//! Every error aborts the serialization in progress; a partial canonical document is
//! never handed back.
//!
//! ## Examples
//!
//! ```rust
//! use canonical_extjson::{doc, to_string_with_options, Bson, Document, Error, ExtJsonOptions};
//!
//! let mut inner = Document::new();
//! inner.insert("x", Bson::Int32(1));
//! let outer = doc!({ "nested": inner });
//!
//! let result = to_string_with_options(&outer, &ExtJsonOptions::new().with_max_depth(0));
//! assert!(matches!(result, Err(Error::DepthExceeded { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while generating canonical Extended JSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while writing the generated text to a sink
    #[error("IO error: {0}")]
    Io(String),

    /// A finite double that lies outside `[f64::MIN, f64::MAX]`
    #[error("Number {0} cannot be represented in JSON")]
    UnrepresentableNumber(f64),

    /// Nesting went past the configured bound
    #[error("document too deeply nested: depth {depth} exceeds the maximum of {max}")]
    DepthExceeded { depth: usize, max: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a depth-exceeded error for a value found at `depth` when at most `max` is allowed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use canonical_extjson::Error;
    ///
    /// let err = Error::depth_exceeded(201, 200);
    /// assert!(err.to_string().contains("too deeply nested"));
    /// ```
    pub fn depth_exceeded(depth: usize, max: usize) -> Self {
        Error::DepthExceeded { depth, max }
    }

    /// Creates an unrepresentable-number error.
    pub fn unrepresentable_number(value: f64) -> Self {
        Error::UnrepresentableNumber(value)
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use canonical_extjson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for sink writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
