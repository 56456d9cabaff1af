use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::document::{DocumentStore, FieldProjector};
use crate::tokenizer::tokenize;

/// Inverted index plus the corpus statistics BM25 scoring needs.
///
/// Built by a full recomputation over the document store: every mutation
/// of the store triggers a rebuild, O(total tokens) per call. That is a
/// deliberate correctness-over-speed trade for small-to-medium corpora;
/// there is no incremental update path.
///
/// Postings store the term frequency directly, keyed by the document's
/// insertion position, so scoring reads `f(t,D)` with a map lookup
/// instead of rescanning a posting list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvertedIndex {
    /// term -> (document position -> term frequency). Sparse: a term
    /// absent from every document has no entry at all.
    postings: HashMap<String, HashMap<usize, usize>>,

    /// Token count per document, parallel to the store's insertion order.
    doc_tokens: Vec<usize>,

    /// Mean token count across the corpus. NaN while the corpus is
    /// empty, which callers must treat as "no ranking possible".
    avg_doc_tokens: f64,
}

impl InvertedIndex {
    /// Creates an empty index for an empty corpus.
    pub fn new() -> Self {
        InvertedIndex {
            postings: HashMap::new(),
            doc_tokens: Vec::new(),
            avg_doc_tokens: f64::NAN,
        }
    }

    /// Rebuilds the index and statistics from scratch for the current
    /// store contents. Deterministic for a given document sequence and
    /// field configuration.
    pub fn rebuild(store: &DocumentStore, projector: &FieldProjector) -> Self {
        let mut postings: HashMap<String, HashMap<usize, usize>> = HashMap::new();
        let mut doc_tokens = Vec::with_capacity(store.len());
        let mut total_tokens = 0usize;

        for (pos, doc) in store.iter().enumerate() {
            let terms = tokenize(&projector.project(doc));
            doc_tokens.push(terms.len());
            total_tokens += terms.len();
            for term in terms {
                *postings.entry(term).or_default().entry(pos).or_insert(0) += 1;
            }
        }

        let avg_doc_tokens = if store.is_empty() {
            f64::NAN
        } else {
            total_tokens as f64 / store.len() as f64
        };

        log::debug!(
            "rebuilt inverted index: {} documents, {} distinct terms, {} total tokens",
            store.len(),
            postings.len(),
            total_tokens,
        );

        InvertedIndex {
            postings,
            doc_tokens,
            avg_doc_tokens,
        }
    }

    /// Returns the posting entry for a term, if any document contains it.
    pub fn posting(&self, term: &str) -> Option<&HashMap<usize, usize>> {
        self.postings.get(term)
    }

    /// Number of distinct documents containing the term.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, HashMap::len)
    }

    /// Frequency of a term within the document at `pos` (0 if absent).
    pub fn term_frequency(&self, term: &str, pos: usize) -> usize {
        self.postings
            .get(term)
            .and_then(|p| p.get(&pos))
            .copied()
            .unwrap_or(0)
    }

    /// Token count of the document at `pos`.
    pub fn doc_tokens(&self, pos: usize) -> usize {
        self.doc_tokens.get(pos).copied().unwrap_or(0)
    }

    /// Sum of all document token counts.
    pub fn total_tokens(&self) -> usize {
        self.doc_tokens.iter().sum()
    }

    /// Number of distinct terms across the corpus.
    pub fn distinct_terms(&self) -> usize {
        self.postings.len()
    }

    /// Average document token count; NaN for an empty corpus.
    pub fn avg_doc_tokens(&self) -> f64 {
        self.avg_doc_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn plain_store(texts: &[&str]) -> DocumentStore {
        let mut store = DocumentStore::new();
        for text in texts {
            store.push(Document::from(*text));
        }
        store
    }

    #[test]
    fn test_rebuild_counts_frequencies() {
        let store = plain_store(&["hello hello world", "hello rust"]);
        let index = InvertedIndex::rebuild(&store, &FieldProjector::Identity);

        assert_eq!(index.term_frequency("hello", 0), 2);
        assert_eq!(index.term_frequency("hello", 1), 1);
        assert_eq!(index.term_frequency("world", 0), 1);
        assert_eq!(index.term_frequency("world", 1), 0);
        assert_eq!(index.doc_frequency("hello"), 2);
        assert_eq!(index.doc_frequency("world"), 1);
    }

    #[test]
    fn test_index_is_sparse() {
        let store = plain_store(&["hello world"]);
        let index = InvertedIndex::rebuild(&store, &FieldProjector::Identity);

        assert!(index.posting("absent").is_none());
        assert_eq!(index.doc_frequency("absent"), 0);
        assert_eq!(index.term_frequency("absent", 0), 0);
    }

    #[test]
    fn test_document_lengths_and_average() {
        let store = plain_store(&["one two three", "four five"]);
        let index = InvertedIndex::rebuild(&store, &FieldProjector::Identity);

        assert_eq!(index.doc_tokens(0), 3);
        assert_eq!(index.doc_tokens(1), 2);
        assert_eq!(index.total_tokens(), 5);
        assert_eq!(index.avg_doc_tokens(), 2.5);
    }

    #[test]
    fn test_empty_store_average_is_nan() {
        let store = DocumentStore::new();
        let index = InvertedIndex::rebuild(&store, &FieldProjector::Identity);
        assert!(index.avg_doc_tokens().is_nan());
        assert_eq!(index.distinct_terms(), 0);
    }

    #[test]
    fn test_zero_length_document_is_valid() {
        let store = plain_store(&["", "hello"]);
        let index = InvertedIndex::rebuild(&store, &FieldProjector::Identity);
        assert_eq!(index.doc_tokens(0), 0);
        assert_eq!(index.avg_doc_tokens(), 0.5);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let store = plain_store(&["a b c", "b c d", "c d e"]);
        let first = InvertedIndex::rebuild(&store, &FieldProjector::Identity);
        let second = InvertedIndex::rebuild(&store, &FieldProjector::Identity);
        assert_eq!(first.postings, second.postings);
        assert_eq!(first.doc_tokens, second.doc_tokens);
    }

    #[test]
    fn test_case_sensitive_terms() {
        let store = plain_store(&["Shane shane"]);
        let index = InvertedIndex::rebuild(&store, &FieldProjector::Identity);
        assert_eq!(index.term_frequency("Shane", 0), 1);
        assert_eq!(index.term_frequency("shane", 0), 1);
        assert_eq!(index.distinct_terms(), 2);
    }
}
