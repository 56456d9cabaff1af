use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when working with the BM25 engine.
///
/// All failures are local, deterministic and surfaced synchronously.
/// Well-behaved edge cases (empty corpus, empty query, a document lacking
/// a registered indexed field) are not errors.
#[derive(Error, Debug)]
pub enum BM25Error {
    /// Error when a scoring constant is invalid (e.g. negative `k1`).
    #[error("BM25 engine, invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Error when trying to register an indexed field on a plain-text engine.
    #[error("BM25 engine, field {field:?} cannot be registered in plain-text mode")]
    NotStructured { field: String },

    /// Error when a structured document lacks the designated identity field.
    #[error("BM25 engine, document is missing identity field {field:?}")]
    MissingIdentity { field: String },

    /// Error when a document's shape does not match the engine's mode.
    #[error("BM25 engine, invalid document: {reason}")]
    InvalidDocument { reason: String },
}
