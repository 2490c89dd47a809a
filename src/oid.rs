//! The 12-byte object identifier.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A 12-byte unique identifier, rendered as 24 lowercase hex characters.
///
/// # Examples
///
/// ```rust
/// use canonical_extjson::ObjectId;
///
/// let oid: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
/// assert_eq!(oid.to_hex(), "507f1f77bcf86cd799439011");
/// assert_eq!(oid.bytes()[0], 0x50);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        ObjectId(bytes)
    }

    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Parses a 24-character hex string (either case).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 12 bytes of hex.
    pub fn parse_str(s: &str) -> Result<Self> {
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| Error::custom(format!("invalid ObjectId hex {s:?}: {e}")))?;
        Ok(ObjectId(bytes))
    }

    /// Returns the 24-character lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 12]> for ObjectId {
    fn from(bytes: [u8; 12]) -> Self {
        ObjectId(bytes)
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
