//! Japanese text segmentation
//!
//! Queries and stored content are Japanese text without explicit word
//! boundaries. This module segments text into tokens for the full-text
//! index; the same segmentation feeds both the indexing path (words column)
//! and the query path (match expression), so the two always agree.

/// Segments text into tokens, dropping whitespace-only tokens.
///
/// The underlying segmenter emits whitespace as part of its token stream;
/// tokens are trimmed and empty ones filtered, since they carry no search
/// value.
pub fn segment(text: &str) -> Vec<String> {
    tinysegmenter::tokenize(text)
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Segments text and joins the tokens with single spaces.
///
/// This is the form stored in the `words` column of the full-text index and
/// the form matched against it.
pub fn segment_to_words(text: &str) -> String {
    segment(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_japanese() {
        let tokens = segment("私は学生です");
        assert!(!tokens.is_empty());
        // No token is empty or whitespace
        assert!(tokens.iter().all(|t| !t.trim().is_empty()));
        // Concatenation reproduces the input
        assert_eq!(tokens.concat(), "私は学生です");
    }

    #[test]
    fn test_segment_drops_whitespace_tokens() {
        let tokens = segment("abc def");
        assert_eq!(tokens, vec!["abc", "def"]);
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
        assert!(segment("   ").is_empty());
    }

    #[test]
    fn test_segment_to_words() {
        assert_eq!(segment_to_words("abc def"), "abc def");
    }
}
