use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{ScoredDocument, VectorDocument};

/// Vector index over embedded documents.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn add(&self, document: VectorDocument) -> Result<(), anyhow::Error>;

    /// Adds many documents; implementations may do it in one transaction.
    async fn add_batch(&self, documents: Vec<VectorDocument>) -> Result<(), anyhow::Error> {
        for document in documents {
            self.add(document).await?;
        }
        Ok(())
    }

    /// Returns true when a document was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error>;

    /// Top `limit` documents by cosine similarity to `query_embedding`, best first.
    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, anyhow::Error>;

    async fn count(&self) -> Result<usize, anyhow::Error>;
}
