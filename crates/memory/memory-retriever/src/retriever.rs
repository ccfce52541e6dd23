//! Embedding-based similarity retrieval.

use std::sync::Arc;

use async_trait::async_trait;
use embedding::EmbeddingService;
use memory_core::{RetrievedDocument, VectorDocument, VectorStore};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Similarity-search capability: `retrieve(query, k)` → up to `k` documents, most similar first.
#[async_trait]
pub trait SimilarityRetriever: Send + Sync {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>, anyhow::Error>;
}

pub struct EmbeddingRetriever {
    embedding_service: Arc<dyn EmbeddingService>,
    store: Arc<dyn VectorStore>,
    min_score: f32,
}

impl EmbeddingRetriever {
    pub fn new(embedding_service: Arc<dyn EmbeddingService>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedding_service,
            store,
            min_score: 0.0,
        }
    }

    /// Hits scoring below `min_score` are dropped.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Embeds and stores one document.
    pub async fn index(
        &self,
        content: &str,
        metadata: Map<String, Value>,
    ) -> Result<(), anyhow::Error> {
        let embedding = self.embedding_service.embed(content).await?;
        self.store
            .add(VectorDocument::new(content, metadata, embedding))
            .await
    }

    /// Embeds documents in one call and stores them. Returns how many were indexed.
    pub async fn index_batch(&self, documents: Vec<RetrievedDocument>) -> Result<usize, anyhow::Error> {
        if documents.is_empty() {
            return Ok(0);
        }
        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let embeddings = self.embedding_service.embed_batch(&texts).await?;
        if embeddings.len() != documents.len() {
            anyhow::bail!(
                "Expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            );
        }

        let vectors: Vec<VectorDocument> = documents
            .into_iter()
            .zip(embeddings)
            .map(|(doc, embedding)| VectorDocument::new(doc.content, doc.metadata, embedding))
            .collect();
        let count = vectors.len();
        self.store.add_batch(vectors).await?;
        Ok(count)
    }
}

#[async_trait]
impl SimilarityRetriever for EmbeddingRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>, anyhow::Error> {
        let query = query.trim();
        if query.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        info!(query_len = query.len(), k, "step: embedding generate query vector");
        let query_embedding = self.embedding_service.embed(query).await?;

        let scored = self.store.similarity_search(&query_embedding, k).await?;

        let count_before = scored.len();
        if count_before > 0 {
            let min_s = scored.iter().map(|s| s.score).fold(f32::NAN, f32::min);
            let max_s = scored.iter().map(|s| s.score).fold(f32::NAN, f32::max);
            info!(
                count = count_before,
                score_min = %min_s,
                score_max = %max_s,
                "step: similarity_search score distribution"
            );
        }

        let documents: Vec<RetrievedDocument> = scored
            .into_iter()
            .filter(|s| s.score >= self.min_score)
            .map(RetrievedDocument::from)
            .collect();

        if count_before > 0 && documents.is_empty() {
            warn!(
                min_score = self.min_score,
                count_before, "all similarity results below threshold, none kept"
            );
        }
        Ok(documents)
    }
}
