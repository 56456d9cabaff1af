use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A document in the corpus.
///
/// The engine supports two document shapes: a bare string (plain-text
/// mode) and a record of named JSON fields (structured mode). An engine
/// instance accepts only the shape matching its mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    /// A plain-text document; its identity is its sequence position.
    Text(String),
    /// A structured document; its identity is the value of the engine's
    /// designated identity field.
    Fields(serde_json::Map<String, Value>),
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::Text(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::Text(text.to_string())
    }
}

impl From<serde_json::Map<String, Value>> for Document {
    fn from(fields: serde_json::Map<String, Value>) -> Self {
        Document::Fields(fields)
    }
}

impl Document {
    /// Returns the field value for `name`, or `None` for plain-text
    /// documents and missing fields.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Document::Text(_) => None,
            Document::Fields(fields) => fields.get(name),
        }
    }
}

/// Renders a JSON field value as tokenizable text.
///
/// Strings are used as-is (no quoting), null renders empty, everything
/// else uses its JSON serialization.
pub(crate) fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extracts the tokenizable text of a document.
///
/// The structured variant concatenates the registered indexed fields in
/// registration order, separated by a single space; a field absent on a
/// given document contributes empty text rather than an error, so
/// heterogeneous documents index fine. The plain-text variant is the
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldProjector {
    /// Plain-text mode: the document is its own text.
    Identity,
    /// Structured mode: concatenate the named fields in order.
    Fields(Vec<String>),
}

impl FieldProjector {
    /// Registers a field name, keeping the set ordered and duplicate-free.
    pub fn add_field(&mut self, field: String) {
        if let FieldProjector::Fields(fields) = self
            && !fields.contains(&field)
        {
            fields.push(field);
        }
    }

    /// Returns the projected text for a document.
    pub fn project(&self, doc: &Document) -> String {
        match (self, doc) {
            (FieldProjector::Identity, Document::Text(text)) => text.clone(),
            (FieldProjector::Fields(fields), Document::Fields(_)) => fields
                .iter()
                .map(|f| doc.field(f).map(field_text).unwrap_or_default())
                .collect::<Vec<String>>()
                .join(" "),
            // A mode mismatch is rejected before documents reach the
            // store; project nothing if one slips through.
            _ => String::new(),
        }
    }
}

/// Holds the corpus keyed by document identity, preserving insertion
/// order. Insertion order is what breaks score ties during search.
///
/// Not thread-safe by contract; the engine owns it exclusively.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DocumentStore {
    docs: Vec<Document>,
    /// Maps a structured document's identity to its position in `docs`.
    /// Empty in plain-text mode, where identity is the position itself.
    positions: HashMap<String, usize>,
}

impl DocumentStore {
    /// Creates a new empty document store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Inserts a document under an identity key, overwriting in place if
    /// the identity already exists. Positions are stable: an overwrite
    /// keeps the document's original insertion rank.
    pub fn upsert(&mut self, id: String, doc: Document) {
        match self.positions.get(&id) {
            Some(&pos) => self.docs[pos] = doc,
            None => {
                self.positions.insert(id, self.docs.len());
                self.docs.push(doc);
            }
        }
    }

    /// Appends a document, used in plain-text mode where there is no
    /// natural re-identification key.
    pub fn push(&mut self, doc: Document) {
        self.docs.push(doc);
    }

    /// Returns the document at an insertion position.
    pub fn get(&self, pos: usize) -> Option<&Document> {
        self.docs.get(pos)
    }

    /// Iterates the documents in original insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }
}
