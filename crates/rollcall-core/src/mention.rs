//! Extraction of `@`-mentioned emails from notification text.
//!
//! A mention is an `@` marker immediately followed by a full email address,
//! so the mention itself contains two `@` characters: `@jane@example.com`
//! mentions `jane@example.com`. A lone `@example.com` is not a mention.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Pattern is a literal
static MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@[^\s@]+@[^\s@]+\.[^\s@]+").expect("mention pattern is valid")
});

/// Returns the distinct emails mentioned in `text`, in order of first
/// occurrence.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    MENTION
        .find_iter(text)
        .map(|m| &m.as_str()[1..])
        .filter(|email| seen.insert(*email))
        .map(str::to_string)
        .collect()
}
