//! Search tuning constants
//!
//! Defines the limits, thresholds and boosts used by hybrid search.

/// Number of nearest neighbours fetched from the semantic retriever
pub const SEMANTIC_TOP_K: usize = 10;

/// Maximum number of results returned by a search
pub const MAX_RESULTS: usize = 6;

/// Minimum partial-ratio score for a fuzzy hit
pub const FUZZY_THRESHOLD: f64 = 80.0;

/// Score for a query found verbatim in a title
pub const TITLE_EXACT_SCORE: f64 = 200.0;

/// Score for a query found verbatim in the content
pub const CONTENT_EXACT_SCORE: f64 = 180.0;

/// Bonus when the title matches better than the content
pub const TITLE_BOOST: f64 = 50.0;

/// Characters of content included in a hit's snippet
pub const SNIPPET_CHARS: usize = 200;

/// Longest query accepted; fuzzy scoring cost grows with the square of it
pub const MAX_QUERY_CHARS: usize = 256;
