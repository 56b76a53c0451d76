//! Human-readable renderers for command output

pub mod search_results;

pub use search_results::SearchResultsView;
