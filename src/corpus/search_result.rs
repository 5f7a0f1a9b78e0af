use super::{line_match::LineMatch, span::Span};
use std::collections::BTreeMap;

/// Matches of a query inside one sonnet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    title: String,
    title_spans: Vec<Span>,
    line_matches: Vec<LineMatch>,
    matches: usize,
}

impl SearchResult {
    pub fn new(title: String, title_spans: Vec<Span>, line_matches: Vec<LineMatch>) -> Self {
        let matches =
            title_spans.len() + line_matches.iter().map(|m| m.spans.len()).sum::<usize>();

        Self {
            title,
            title_spans,
            line_matches,
            matches,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_spans(&self) -> &[Span] {
        &self.title_spans
    }

    /// Matched lines, ascending by line number.
    pub fn line_matches(&self) -> &[LineMatch] {
        &self.line_matches
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn is_match(&self) -> bool {
        self.matches() > 0
    }

    /// Excludes the sonnet from the output. Spans are left in place but are
    /// never shown once the count is zero.
    pub fn clear_matches(&mut self) {
        self.matches = 0;
    }

    /// Merges the matches of another query word found in the same sonnet.
    ///
    /// Counts are summed as they are, title spans are concatenated and sorted,
    /// and lines are united by line number keeping the first text seen.
    pub fn combine(&self, other: &SearchResult) -> SearchResult {
        let mut title_spans: Vec<Span> = self
            .title_spans
            .iter()
            .chain(&other.title_spans)
            .copied()
            .collect();
        title_spans.sort_unstable();

        let mut lines: BTreeMap<usize, LineMatch> = BTreeMap::new();
        for line_match in self.line_matches.iter().chain(&other.line_matches) {
            lines
                .entry(line_match.line_number)
                .and_modify(|merged| merged.spans.extend_from_slice(&line_match.spans))
                .or_insert_with(|| line_match.clone());
        }

        SearchResult {
            title: self.title.clone(),
            title_spans,
            line_matches: lines.into_values().collect(),
            matches: self.matches + other.matches,
        }
    }
}
