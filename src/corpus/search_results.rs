use super::search_result::SearchResult;
use std::ops::{Index, IndexMut};

/// Per-sonnet results of a query, in corpus order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResults(Vec<SearchResult>);

impl SearchResults {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.0.iter()
    }

    /// Results with at least one match, in corpus order.
    pub fn matched(&self) -> impl Iterator<Item = &SearchResult> {
        self.iter().filter(|r| r.is_match())
    }

    pub fn matched_count(&self) -> usize {
        self.matched().count()
    }
}

impl FromIterator<SearchResult> for SearchResults {
    fn from_iter<I: IntoIterator<Item = SearchResult>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for SearchResults {
    type Output = SearchResult;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for SearchResults {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}
