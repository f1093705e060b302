//! Title slugification
//!
//! Converts arbitrary note titles into filesystem-safe tokens that are used
//! as filename components. Example: "Project Ideas" becomes "project-ideas".

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that are neither word characters, whitespace, nor hyphens
static STRIP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// Runs of whitespace
static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Runs of hyphens
static HYPHEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Convert a title into a slug.
///
/// Lowercases and trims the input, removes special characters, replaces
/// whitespace runs with single hyphens, collapses repeated hyphens, and
/// strips leading/trailing hyphens. Total over all inputs: an empty or
/// all-punctuation title yields an empty slug. Applying `slugify` to its own
/// output returns it unchanged, so slugs are stable filename components.
///
/// Distinct titles can map to the same slug (case and punctuation are
/// discarded); the store resolves such collisions as last write wins.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = STRIP_PATTERN.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE_PATTERN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_PATTERN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
