//! Slug derivation.
//!
//! Slugs are derived server-side from display names on every create and
//! update; they are never client-supplied.

/// Derives a URL-safe, lowercase, hyphenated slug from a display name.
///
/// Alphanumeric characters are kept (lowercased); every other run of
/// characters collapses into a single hyphen. Leading and trailing hyphens
/// are trimmed. The transform is deterministic: equal names yield equal
/// slugs.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
