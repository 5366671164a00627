//! Person records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PersonId = Uuid;

/// Someone who reports time.
///
/// `(first_name, last_name)` is a lookup key, not a uniqueness constraint:
/// duplicates may exist and resolve to the first one in storage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    /// Creates a new person with a generated stable ID.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
