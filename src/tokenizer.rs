//! Whitespace tokenizer.
//!
//! Splits text on runs of whitespace and nothing else: no case folding,
//! no stemming, no stopword removal. Case and punctuation are preserved
//! as-is, so `"Shane"` and `"shane"` are distinct terms.

/// Tokenizes text into an ordered sequence of terms.
///
/// Empty input (or input that is all whitespace) yields an empty vector.
/// Pure function with no shared state.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("The quick brown fox");
        assert_eq!(tokens, vec!["The", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_tokenize_collapses_whitespace_runs() {
        let tokens = tokenize("  hello \t world\n\nagain ");
        assert_eq!(tokens, vec!["hello", "world", "again"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
    }

    #[test]
    fn test_tokenize_preserves_case_and_punctuation() {
        let tokens = tokenize("Hello, World!");
        assert_eq!(tokens, vec!["Hello,", "World!"]);
    }

    #[test]
    fn test_tokenize_keeps_duplicates_in_order() {
        let tokens = tokenize("a b a a");
        assert_eq!(tokens, vec!["a", "b", "a", "a"]);
    }
}
