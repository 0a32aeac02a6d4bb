//! Actor identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An account identity, as authenticated by the embedding host.
///
/// Principals are opaque here: the ledgers only compare them for
/// equality and use their ordering as ledger map keys. Serializes as a
/// bare string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Principal(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Principal(id.to_string())
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Principal(id)
    }
}
