//! Embedding configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Embedding service configuration interface (OpenAI-compatible endpoints).
pub trait EmbeddingConfig: Send + Sync {
    fn api_key(&self) -> &str;
    /// Custom endpoint; `None` means the provider default.
    fn base_url(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub embedding_model: String,
    pub embedding_timeout_secs: u64,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref().filter(|s| !s.is_empty())
    }
    fn model(&self) -> &str {
        &self.embedding_model
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.embedding_timeout_secs)
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let embedding_model = env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "text-embedding-3-small".to_string());
        let embedding_timeout_secs = match env::var("EMBEDDING_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("EMBEDDING_TIMEOUT_SECS is not a number: {}", raw))?,
            Err(_) => 30,
        };
        Ok(Self {
            openai_api_key,
            openai_base_url,
            embedding_model,
            embedding_timeout_secs,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is required for embeddings");
        }
        if self.embedding_timeout_secs == 0 {
            anyhow::bail!("EMBEDDING_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}
