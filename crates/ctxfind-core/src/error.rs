//! Search configuration errors.

use crate::target::SearchType;

/// Errors raised while turning user input into a [`SearchTarget`](crate::SearchTarget).
///
/// All of these are startup-time failures: they are reported before any file is read.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("invalid regular expression `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("could not parse `{0}` as a line number (expected an integer >= 1)")]
    InvalidLineNumber(String),

    #[error("unknown search type: {0}")]
    UnknownSearchType(String),

    #[error("a search term is required for {0} searches")]
    MissingTerm(SearchType),
}
