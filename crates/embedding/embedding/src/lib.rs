//! Embedding interface used by the similarity retriever.
//!
//! Corpus documents are embedded once at load time with [`EmbeddingService::embed_batch`];
//! each user query is embedded with [`EmbeddingService::embed`] and compared against them.

use async_trait::async_trait;

mod config;
pub use config::{EmbeddingConfig, EnvEmbeddingConfig};

#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Embeds a single query string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;

    /// One vector per input, in input order. An empty input yields an empty output.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error>;
}
