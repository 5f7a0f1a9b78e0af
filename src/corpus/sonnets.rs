use super::{search_results::SearchResults, sonnet::Sonnet};
use strum::{Display, EnumString, VariantNames};

/// How results for the words of a multi-word query are combined.
#[derive(Display, EnumString, VariantNames, Default, PartialEq, Eq, Copy, Clone, Debug)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SearchMode {
    /// Every word has to occur in a sonnet.
    #[default]
    And,
    /// At least one word has to occur in a sonnet.
    Or,
}

/// The loaded corpus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sonnets(Vec<Sonnet>);

impl Sonnets {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn search_word(&self, word: &str) -> SearchResults {
        self.0.iter().map(|sonnet| sonnet.search_for(word)).collect()
    }

    /// Searches for every word and folds the per-word results together.
    ///
    /// The returned collection always has one entry per sonnet, in corpus
    /// order. In `And` mode a sonnet missing any word ends up with zero
    /// matches; in `Or` mode the results of all words are combined.
    pub fn search<S: AsRef<str>>(&self, words: &[S], mode: SearchMode) -> SearchResults {
        let mut words = words.iter().map(AsRef::as_ref);

        let Some(first) = words.next() else {
            return self.search_word("");
        };

        let mut combined = self.search_word(first);

        for word in words {
            let results = self.search_word(word);

            for (i, result) in results.iter().enumerate() {
                match mode {
                    SearchMode::And => {
                        if combined[i].is_match() && result.is_match() {
                            combined[i] = combined[i].combine(result);
                        } else {
                            combined[i].clear_matches();
                        }
                    }
                    SearchMode::Or => combined[i] = combined[i].combine(result),
                }
            }
        }

        combined
    }
}

impl FromIterator<Sonnet> for Sonnets {
    fn from_iter<I: IntoIterator<Item = Sonnet>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
