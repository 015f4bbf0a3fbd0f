/// Case-insensitive text matching used by the user and category filters
///
/// Matching uses Unicode lowercasing. Callers lowercase the needle once with
/// [`normalize`] and reuse it per candidate. An empty needle matches every
/// haystack.

/// Lowercases a search term for repeated matching
pub fn normalize(term: &str) -> String {
    term.to_lowercase()
}

/// Returns true if `needle` (already normalized) occurs in `haystack`, ignoring case
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}
