//! Domain model for time registration.
//!
//! # Responsibility
//! - Define the records persisted by the core: persons, projects,
//!   activities and reported time entries.
//! - Own natural-key normalization shared by storage and lookup.
//!
//! # Invariants
//! - Every record is identified by a UUID assigned at creation.
//! - Records are never mutated in place; only created or deleted.
//! - Display casing is preserved; lookups go through [`natural_key`].

pub mod activity;
pub mod hours;
pub mod person;
pub mod project;
pub mod reported_time;

/// Normalizes a human-entered name into its case-insensitive lookup key.
///
/// Uses Unicode lower-casing, so `"ÅSA"` and `"åsa"` share one key.
/// Whitespace is significant and kept as-is.
pub fn natural_key(value: &str) -> String {
    value.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::natural_key;

    #[test]
    fn natural_key_lowercases_unicode_and_keeps_whitespace() {
        assert_eq!(natural_key("JOHN"), "john");
        assert_eq!(natural_key("ÅSA"), "åsa");
        assert_eq!(natural_key(" Doe "), " doe ");
    }
}
