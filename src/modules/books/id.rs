use std::{fmt, str::FromStr};

use mongodb::bson::oid::ObjectId;
use thiserror::Error;

/// Store-assigned book identifier.
///
/// Wraps the 12-byte MongoDB `ObjectId`. On the wire it is always the
/// 24-character lowercase hex form; parse with [`str::parse`], format with
/// `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(ObjectId);

impl BookId {
    /// Fresh identifier, unique within this process and ordered by creation time.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidBookId(s.to_string()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Path identifier that is not a 24-character hex string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid book ID format: '{0}'")]
pub struct InvalidBookId(pub String);
