use super::{
    line_match::LineMatch,
    search_result::SearchResult,
    span::{find_spans, fold_case},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single poem as served by PoetryDB.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sonnet {
    title: String,
    lines: Vec<String>,
    // `author`, `linecount` and whatever else the endpoint sends
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Sonnet {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
            extra: Map::new(),
        }
    }

    /// Case-insensitive substring search over the title and every line.
    ///
    /// A sonnet without any occurrence still yields a result with zero
    /// matches, so results stay aligned with the collection they came from.
    pub fn search_for(&self, query: &str) -> SearchResult {
        let pattern = fold_case(query);

        let title_spans = find_spans(&fold_case(&self.title), &pattern);

        let line_matches = self
            .lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let spans = find_spans(&fold_case(line), &pattern);
                (!spans.is_empty()).then(|| LineMatch::new(index + 1, line.clone(), spans))
            })
            .collect();

        SearchResult::new(self.title.clone(), title_spans, line_matches)
    }
}
