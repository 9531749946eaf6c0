//! Test helpers for generating unique test data
//!
//! Utilities to generate unique test data using ULIDs so tests never collide
//! on session codes, display names, or other identifying strings.

use ulid::Ulid;

/// Generate a unique string with the given prefix.
///
/// # Examples
/// ```
/// use engine_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("session");
/// let id2 = unique_str("session");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("session-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique, human-looking display name with the given prefix.
///
/// # Examples
/// ```
/// use engine_test_support::unique_helpers::unique_display_name;
///
/// let name1 = unique_display_name("Player");
/// let name2 = unique_display_name("Player");
/// assert_ne!(name1, name2);
/// assert!(name1.starts_with("Player "));
/// ```
pub fn unique_display_name(prefix: &str) -> String {
    let ulid = Ulid::new().to_string();
    format!("{} {}", prefix, &ulid[ulid.len() - 8..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_str_differs_between_calls() {
        assert_ne!(unique_str("x"), unique_str("x"));
    }

    #[test]
    fn unique_display_name_keeps_prefix() {
        let name = unique_display_name("Guesser");
        assert!(name.starts_with("Guesser "));
    }
}
