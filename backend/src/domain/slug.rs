//! Slug validation for content identifiers.
//!
//! Gallery slugs appear verbatim in URLs, so they are trimmed, non-empty and
//! limited to lowercase ASCII letters, digits and hyphens.

/// Return `true` when `value` can be used as a URL slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}
