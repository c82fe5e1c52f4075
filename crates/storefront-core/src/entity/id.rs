//! Record identifiers.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifier of a remote record.
///
/// The service decides the id type. Integers and strings (UUIDs, bigints
/// serialized as text) are both accepted and compared by exact value, so
/// `7` and `"7"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

/// Command-line form: digits parse as an integer id, anything else is a
/// string id.
impl FromStr for EntityId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>().map_or_else(|_| Self::from(s), Self::Int))
    }
}
