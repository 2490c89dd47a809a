//! Configuration options for canonical Extended JSON generation.
//!
//! The canonical format has no layout knobs: output is always single-line and byte-compact.
//! What remains configurable is the resource bound on nesting.
//!
//! ## Examples
//!
//! ```rust
//! use canonical_extjson::{doc, to_string_with_options, ExtJsonOptions};
//!
//! let options = ExtJsonOptions::new().with_max_depth(16);
//! let json = to_string_with_options(&doc!({ "a": 1 }), &options).unwrap();
//! assert_eq!(json, r#"{"a":{"$numberInt":"1"}}"#);
//! ```
//!
//! Options can also be loaded from configuration files through serde; missing fields fall
//! back to their defaults.

use serde::{Deserialize, Serialize};

/// Default bound on document, array, and code-with-scope nesting.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Configuration options for canonical Extended JSON generation.
///
/// # Examples
///
/// ```rust
/// use canonical_extjson::{ExtJsonOptions, DEFAULT_MAX_DEPTH};
///
/// let options = ExtJsonOptions::new();
/// assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
///
/// let options = ExtJsonOptions::new().with_max_depth(32);
/// assert_eq!(options.max_depth, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtJsonOptions {
    /// Deepest nesting level that may be emitted. The top-level document sits at depth 0.
    pub max_depth: usize,
}

impl Default for ExtJsonOptions {
    fn default() -> Self {
        ExtJsonOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExtJsonOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deepest nesting level that may be emitted.
    ///
    /// A value of `0` only admits a flat top-level document.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
