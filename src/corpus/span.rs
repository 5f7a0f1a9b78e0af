/// Half-open `(start, end)` interval of character offsets.
pub type Span = (usize, usize);

/// Lowercases `text` one character at a time so that the result has exactly
/// as many characters as the input.
pub fn fold_case(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Returns every (possibly overlapping) occurrence of `pattern` in `haystack`.
/// Both inputs are expected to be case folded already.
pub fn find_spans(haystack: &[char], pattern: &[char]) -> Vec<Span> {
    if pattern.is_empty() {
        return Vec::new();
    }

    haystack
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(start, _)| (start, start + pattern.len()))
        .collect()
}
