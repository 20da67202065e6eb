//! Query translation
//!
//! A free-text query has no whitespace word boundaries, but the full-text
//! index matches whitespace-delimited terms. Translation segments the query
//! with the same segmenter used at indexing time and joins the tokens with
//! single spaces into one match expression. Terms are passed to the match
//! operator verbatim; tokens containing FTS syntax do whatever the operator
//! does with them.

use crate::storage::{SearchHit, Storage};
use crate::{segmenter, Result};

/// Builds the match expression for a free-text query.
///
/// Tokens are joined with single spaces, giving the match operator's native
/// AND-of-terms semantics. No escaping or quoting is applied.
pub fn build_match_expression(query: &str) -> String {
    segmenter::segment(query).join(" ")
}

/// Translates a free-text query and executes it against the corpus.
///
/// Result order is whatever the match/join naturally returns.
pub fn search(storage: &Storage, query: &str) -> Result<Vec<SearchHit>> {
    let match_expr = build_match_expression(query);
    storage.search(&match_expr)
}
