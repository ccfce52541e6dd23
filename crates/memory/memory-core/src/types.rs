//! # Core Types
//!
//! ## VectorDocument
//!
//! One indexed document: content, open metadata and its embedding.
//!
//! ## RetrievedDocument
//!
//! What retrieval returns to the router: content plus metadata, never a provider-specific shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDocument {
    pub id: Uuid,
    pub content: String,
    pub metadata: Map<String, Value>,
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

impl VectorDocument {
    /// Creates a document with a generated UUID and the current timestamp.
    pub fn new(content: impl Into<String>, metadata: Map<String, Value>, embedding: Vec<f32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata,
            embedding,
            created_at: Utc::now(),
        }
    }
}

/// A document paired with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub score: f32,
    pub document: VectorDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Normalizes the document shapes a corpus may arrive in.
    ///
    /// Accepts a bare string, or an object carrying the text under `content`,
    /// `page_content` or `text` with optional `metadata`. Returns `None` when no text is found.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::new(s.clone())),
            Value::Object(obj) => {
                let content = ["content", "page_content", "text"]
                    .iter()
                    .find_map(|key| obj.get(*key).and_then(Value::as_str))?;
                let metadata = match obj.get("metadata") {
                    Some(Value::Object(m)) => m.clone(),
                    _ => Map::new(),
                };
                Some(Self::new(content).with_metadata(metadata))
            }
            _ => None,
        }
    }
}

impl From<ScoredDocument> for RetrievedDocument {
    fn from(scored: ScoredDocument) -> Self {
        let mut metadata = scored.document.metadata;
        metadata.insert("id".to_string(), Value::from(scored.document.id.to_string()));
        metadata.insert("score".to_string(), Value::from(scored.score as f64));
        Self {
            content: scored.document.content,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_shapes() {
        let plain = RetrievedDocument::from_json(&json!("just text")).unwrap();
        assert_eq!(plain.content, "just text");
        assert!(plain.metadata.is_empty());

        let page = RetrievedDocument::from_json(&json!({
            "page_content": "from a loader",
            "metadata": {"source": "faq.md"}
        }))
        .unwrap();
        assert_eq!(page.content, "from a loader");
        assert_eq!(page.metadata["source"], "faq.md");

        let text = RetrievedDocument::from_json(&json!({"text": "t"})).unwrap();
        assert_eq!(text.content, "t");

        assert!(RetrievedDocument::from_json(&json!({"title": "no body"})).is_none());
        assert!(RetrievedDocument::from_json(&json!(42)).is_none());
    }

    #[test]
    fn test_scored_document_keeps_score() {
        let doc = VectorDocument::new("x", Map::new(), vec![1.0]);
        let id = doc.id.to_string();
        let retrieved: RetrievedDocument = ScoredDocument { score: 0.5, document: doc }.into();
        assert_eq!(retrieved.metadata["score"], 0.5);
        assert_eq!(retrieved.metadata["id"], id.as_str());
    }
}
