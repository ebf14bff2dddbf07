//! Text canonicalization applied before comparing phrases.

/// Normalize a phrase for comparison.
///
/// Lowercases, drops everything that is not an ASCII letter, ASCII digit or
/// whitespace, then collapses whitespace runs into single spaces and trims.
/// The result is stable under repeated application.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an optional phrase, treating a missing value as empty.
pub fn normalize_opt(raw: Option<&str>) -> String {
    normalize(raw.unwrap_or_default())
}
