//! Default attribute registry.
//!
//! Every entry carries the same five attributes. They exist from construction,
//! survive `clear()`, and can be updated but never removed. Anything else is a
//! custom attribute.

/// Title of the entry.
pub const TITLE: &str = "Title";
/// URL the credential belongs to.
pub const URL: &str = "URL";
/// Login name.
pub const USER_NAME: &str = "UserName";
/// The secret itself.
pub const PASSWORD: &str = "Password";
/// Free-form notes.
pub const NOTES: &str = "Notes";

/// The default attributes, in their canonical order.
///
/// This is the single source of truth for which keys are non-removable.
pub const DEFAULT_KEYS: [&str; 5] = [TITLE, URL, USER_NAME, PASSWORD, NOTES];

/// Whether `key` is one of the default attributes.
///
/// Matching is exact and case-sensitive: `"title"` is a custom key.
pub fn is_default_attribute(key: &str) -> bool {
    DEFAULT_KEYS.contains(&key)
}

/// Iterate over the default attribute names.
pub fn default_keys() -> impl Iterator<Item = &'static str> {
    DEFAULT_KEYS.iter().copied()
}
