pub mod line_match;
pub mod loader;
pub mod search_result;
pub mod search_results;
pub mod sonnet;
pub mod sonnets;
pub mod span;

pub use loader::{CorpusLoader, PoetryDb};
pub use search_results::SearchResults;
pub use sonnets::{SearchMode, Sonnets};
