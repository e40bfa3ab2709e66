//! Project id generation: slug of the name plus a short random suffix.

use rand_core::{OsRng, RngCore};

/// Slugify arbitrary text to lowercase kebab-case.
pub fn generate_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// A short hex string from `num_bytes` random bytes.
pub fn short_random(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate a project id from its name. Unnameable inputs fall back to a
/// random base so ids never start with the separator.
pub fn generate_id(name: &str) -> String {
    let slug = generate_slug(name);
    let base = if slug.is_empty() { short_random(6) } else { slug };
    format!("{}-{}", base, short_random(3))
}
