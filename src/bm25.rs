//! BM25 ranking engine over an in-memory document store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{Document, DocumentStore, FieldProjector};
use crate::error::*;
use crate::index::InvertedIndex;
use crate::tokenizer::tokenize;

/// Configuration parameters for the BM25 ranking algorithm.
///
/// - `k1`: Controls term-frequency saturation. Higher values give more
///   weight to repeated terms.
/// - `b`: Controls document-length normalization. 0.0 means no
///   normalization, 1.0 means full normalization.
/// - `delta`: BM25+ lower-bound term. Reserved for a future scoring
///   variant; the core scorer does not apply it.
/// - `idf`: Which inverse-document-frequency formula to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BM25Config {
    pub k1: f64,
    pub b: f64,
    pub delta: f64,
    pub idf: IdfWeighting,
}

impl Default for BM25Config {
    /// Returns default BM25 parameters (k1=1.5, b=0.75, smoothed IDF).
    fn default() -> Self {
        BM25Config {
            k1: 1.5,
            b: 0.75,
            delta: 0.5,
            idf: IdfWeighting::default(),
        }
    }
}

impl BM25Config {
    /// Checks that every constant is usable for scoring.
    fn validate(&self) -> Result<(), BM25Error> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(BM25Error::InvalidConfig {
                reason: format!("k1 must be finite and non-negative, got {}", self.k1),
            });
        }
        if !self.b.is_finite() || !(0.0..=1.0).contains(&self.b) {
            return Err(BM25Error::InvalidConfig {
                reason: format!("b must be within [0.0, 1.0], got {}", self.b),
            });
        }
        if !self.delta.is_finite() || self.delta < 0.0 {
            return Err(BM25Error::InvalidConfig {
                reason: format!("delta must be finite and non-negative, got {}", self.delta),
            });
        }
        Ok(())
    }
}

/// Inverse-document-frequency formula selector.
///
/// Both forms appear as intentional variants in BM25 literature, so the
/// choice is explicit configuration rather than a silent default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdfWeighting {
    /// `ln(1 + (N - df + 0.5) / (df + 0.5))`. Never negative, so a
    /// document's score is never driven down by matching a very common
    /// query term. Defined and positive even for unseen terms (df = 0).
    #[default]
    Smoothed,
    /// `ln((N - df + 0.5) / (df + 0.5))`. The classic Robertson form;
    /// goes negative for terms appearing in more than half the corpus.
    Robertson,
}

impl IdfWeighting {
    /// Computes the IDF weight for a term with document frequency `df`
    /// in a corpus of `n` documents.
    pub fn weight(&self, n: usize, df: usize) -> f64 {
        let ratio = (n as f64 - df as f64 + 0.5) / (df as f64 + 0.5);
        match self {
            IdfWeighting::Smoothed => (1.0 + ratio).ln(),
            IdfWeighting::Robertson => ratio.ln(),
        }
    }
}

/// A document paired with its relevance score for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    pub score: f64,
}

/// A snapshot of corpus statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    /// Number of documents in the store.
    pub num_documents: usize,
    /// Sum of all document token counts.
    pub total_tokens: usize,
    /// Number of distinct terms in the inverted index.
    pub distinct_terms: usize,
    /// Average document token count; NaN while the store is empty.
    pub avg_doc_tokens: f64,
}

/// In-memory BM25 text-ranking engine.
///
/// Holds a growable corpus, an inverted index over the configured fields
/// and the corpus statistics BM25 needs. Every [`BM25Engine::add_documents`]
/// call triggers a full index rebuild, so mutation cost is O(total
/// tokens) per call; acceptable for small-to-medium corpora, not meant
/// for unbounded ones.
///
/// Operations are synchronous and single-threaded. The engine is not
/// designed for concurrent mutation; callers embedding it in a
/// multi-threaded context must serialize access externally.
pub struct BM25Engine {
    /// BM25 algorithm parameters, immutable after construction.
    config: BM25Config,

    /// Designated identity field; `None` selects plain-text mode.
    identity_field: Option<String>,

    /// Extracts tokenizable text from stored documents.
    projector: FieldProjector,

    /// The corpus, in insertion order.
    store: DocumentStore,

    /// Inverted index and statistics for the current store contents.
    index: InvertedIndex,
}

impl BM25Engine {
    /// Creates a plain-text engine: documents are bare strings and
    /// identity is the sequence position.
    pub fn new(config: Option<BM25Config>) -> Result<Self, BM25Error> {
        Self::construct(None, config)
    }

    /// Creates a structured engine: documents are records of named
    /// fields, identified by the value of `identity_field`. Adding a
    /// document whose identity already exists overwrites the stored one.
    pub fn with_identity_field(
        identity_field: impl Into<String>,
        config: Option<BM25Config>,
    ) -> Result<Self, BM25Error> {
        Self::construct(Some(identity_field.into()), config)
    }

    fn construct(
        identity_field: Option<String>,
        config: Option<BM25Config>,
    ) -> Result<Self, BM25Error> {
        let config = config.unwrap_or_default();
        config.validate()?;
        let projector = match identity_field {
            Some(_) => FieldProjector::Fields(Vec::new()),
            None => FieldProjector::Identity,
        };
        Ok(BM25Engine {
            config,
            identity_field,
            projector,
            store: DocumentStore::new(),
            index: InvertedIndex::new(),
        })
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &BM25Config {
        &self.config
    }

    /// Gets current statistics about the corpus and index.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            num_documents: self.store.len(),
            total_tokens: self.index.total_tokens(),
            distinct_terms: self.index.distinct_terms(),
            avg_doc_tokens: self.index.avg_doc_tokens(),
        }
    }

    /// Registers a field to be projected and tokenized. Structured mode
    /// only; duplicate registrations are ignored. Takes effect on the
    /// next [`BM25Engine::add_documents`] rebuild.
    pub fn add_index(&mut self, field: impl Into<String>) -> Result<(), BM25Error> {
        let field = field.into();
        match self.projector {
            FieldProjector::Identity => Err(BM25Error::NotStructured { field }),
            FieldProjector::Fields(_) => {
                self.projector.add_field(field);
                Ok(())
            }
        }
    }

    /// Upserts documents by identity (or appends, in plain-text mode),
    /// then rebuilds the inverted index and corpus statistics.
    ///
    /// Every document is validated before the store is touched, and the
    /// rebuild produces a fresh index that replaces the old one in a
    /// single assignment, so a failed call leaves the previously
    /// committed index and statistics untouched.
    pub fn add_documents(&mut self, documents: Vec<Document>) -> Result<(), BM25Error> {
        let mut identities = Vec::with_capacity(documents.len());
        for doc in &documents {
            identities.push(self.identity_of(doc)?);
        }

        for (id, doc) in identities.into_iter().zip(documents) {
            match id {
                Some(id) => self.store.upsert(id, doc),
                None => self.store.push(doc),
            }
        }

        self.index = InvertedIndex::rebuild(&self.store, &self.projector);
        Ok(())
    }

    /// Validates a document against the engine's mode and returns its
    /// identity key (`None` in plain-text mode, where documents append).
    fn identity_of(&self, doc: &Document) -> Result<Option<String>, BM25Error> {
        match (&self.identity_field, doc) {
            (None, Document::Text(_)) => Ok(None),
            (None, Document::Fields(_)) => Err(BM25Error::InvalidDocument {
                reason: "expected a plain-text document in plain-text mode".to_string(),
            }),
            (Some(field), Document::Fields(_)) => {
                let value = doc
                    .field(field)
                    .filter(|v| !v.is_null())
                    .ok_or_else(|| BM25Error::MissingIdentity {
                        field: field.clone(),
                    })?;
                Ok(Some(identity_key(value)))
            }
            (Some(_), Document::Text(_)) => Err(BM25Error::InvalidDocument {
                reason: "expected a structured document in structured mode".to_string(),
            }),
        }
    }

    /// Scores every stored document against the query and returns the
    /// full list ordered by descending score. Ties keep the documents'
    /// original insertion order (the sort is stable); callers filter or
    /// truncate if they want to.
    ///
    /// Query terms are not deduplicated: a term repeated in the query
    /// contributes once per occurrence. An empty corpus yields an empty
    /// result; an empty query yields every document at score 0.0.
    pub fn search(&self, query: &str) -> Vec<ScoredDocument<'_>> {
        if self.store.is_empty() {
            return Vec::new();
        }

        let query_terms = tokenize(query);
        let n = self.store.len();
        let avg_doc_tokens = self.index.avg_doc_tokens();
        let mut scores = vec![0.0f64; n];

        for term in &query_terms {
            // A term no document contains has no posting entry and
            // contributes 0 everywhere, though its IDF stays defined.
            let Some(posting) = self.index.posting(term) else {
                continue;
            };
            let idf = self.config.idf.weight(n, posting.len());
            for (&pos, &tf) in posting {
                let tf = tf as f64;
                let dl = self.index.doc_tokens(pos) as f64;
                // tf > 0 for every posting entry, so the denominator is
                // positive even at b = 1 with short documents.
                let norm = 1.0 - self.config.b + self.config.b * dl / avg_doc_tokens;
                scores[pos] += idf * (tf * (self.config.k1 + 1.0)) / (tf + self.config.k1 * norm);
            }
        }

        log::debug!(
            "search: {} query terms scored over {} documents",
            query_terms.len(),
            n,
        );

        let mut results: Vec<ScoredDocument<'_>> = self
            .store
            .iter()
            .zip(scores)
            .map(|(document, score)| ScoredDocument { document, score })
            .collect();
        // Stable sort: equal scores keep insertion order. Scores are
        // always finite, so the comparison never falls back.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }
}

/// Renders an identity field value as a store key. String values are
/// used verbatim; other JSON values use their serialized form, matching
/// how the original data stringifies object keys.
fn identity_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
