//! Category vocabulary validation.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::project::error::ValidationError;

/// Derived category; true iff the project has a recorded bounty prize.
/// Client writers may never supply it.
pub const WINNERS_CATEGORY: &str = "Winners";

/// The fixed vocabulary client writers may choose from.
pub const ALLOWED_CATEGORIES: &[&str] = &[
    "Gaming",
    "DeFi",
    "NFT",
    "Developer Tools",
    "Social",
    "Other",
];

static ALLOWED: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ALLOWED_CATEGORIES.iter().copied().collect());

/// Validate a client-supplied category list.
///
/// Rejects the derived `"Winners"` value outright, then any entry outside
/// the allowed vocabulary, naming the offenders.
pub fn validate_categories(candidate: &[String]) -> Result<(), ValidationError> {
    if candidate.iter().any(|c| c == WINNERS_CATEGORY) {
        return Err(ValidationError::WinnersNotSettable);
    }

    let unknown: Vec<String> = candidate
        .iter()
        .filter(|c| !ALLOWED.contains(c.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(ValidationError::UnknownCategories(unknown));
    }

    Ok(())
}
