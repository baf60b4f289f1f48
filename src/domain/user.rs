//! Strongly-typed user identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the acting user, as assigned by the record store.
///
/// The assistant core never authenticates users itself; it only forwards
/// this identity to the backend and uses its presence to gate tools that
/// act on user-owned records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a UserId from a raw backend identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
