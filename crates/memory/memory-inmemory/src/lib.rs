//! # In-Memory Vector Store
//!
//! [`VectorStore`] kept in a `HashMap` behind an async `RwLock`. Similarity search scans
//! every document, which is fine for tests and small corpora. Nothing survives a restart.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use memory_core::{cosine_similarity, ScoredDocument, VectorDocument, VectorStore};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorStore {
    documents: Arc<RwLock<HashMap<Uuid, VectorDocument>>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, document: VectorDocument) -> Result<(), anyhow::Error> {
        self.documents.write().await.insert(document.id, document);
        Ok(())
    }

    async fn add_batch(&self, documents: Vec<VectorDocument>) -> Result<(), anyhow::Error> {
        let mut guard = self.documents.write().await;
        for document in documents {
            guard.insert(document.id, document);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        Ok(self.documents.write().await.remove(&id).is_some())
    }

    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, anyhow::Error> {
        let documents = self.documents.read().await;

        let mut scored: Vec<ScoredDocument> = documents
            .values()
            .map(|document| ScoredDocument {
                score: cosine_similarity(query_embedding, &document.embedding),
                document: document.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }

    async fn count(&self) -> Result<usize, anyhow::Error> {
        Ok(self.documents.read().await.len())
    }
}
