//! # BM25 Engine
//!
//! An in-memory text-ranking engine: documents go in, an inverted index
//! is maintained over the configured fields, and free-text queries come
//! back as a relevance-ranked list scored with the BM25 algorithm.
//!
//! Every mutation rebuilds the index in full, which keeps the engine
//! trivially consistent at O(total tokens) cost per insert batch. It is
//! built for small-to-medium corpora held entirely in memory; there is
//! no persistence, deletion or text normalization.
//!
//! ```
//! use bm25_engine::{BM25Engine, Document};
//! use serde_json::json;
//!
//! let mut engine = BM25Engine::with_identity_field("id", None)?;
//! engine.add_index("title")?;
//! engine.add_documents(vec![
//!     serde_json::from_value::<Document>(json!({"id": "1", "title": "BM25 ranking"}))?,
//!     serde_json::from_value::<Document>(json!({"id": "2", "title": "vector search"}))?,
//! ])?;
//!
//! let results = engine.search("ranking");
//! assert_eq!(results.len(), 2);
//! assert!(results[0].score > results[1].score);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bm25;
pub mod document;
pub mod error;
pub mod index;
pub mod tokenizer;

pub use bm25::*;
pub use document::{Document, DocumentStore, FieldProjector};
pub use error::*;
pub use index::InvertedIndex;
pub use tokenizer::tokenize;
