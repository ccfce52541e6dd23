//! Realtime web search.
//!
//! [`WebSearch`] is the seam the router depends on; [`TavilySearch`] is the
//! production provider and [`EnvSearchConfig`] reads its settings.

mod config;
mod tavily;

pub use config::EnvSearchConfig;
pub use tavily::{TavilySearch, DEFAULT_TAVILY_BASE_URL};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One web result as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    /// Snippet text used as LLM context.
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

/// Web search provider interface.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Runs a query. An empty `Vec` means the provider answered but found nothing.
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>>;
}
