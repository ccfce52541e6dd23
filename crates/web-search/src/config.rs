//! Search configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

use crate::tavily::DEFAULT_TAVILY_BASE_URL;
use crate::TavilySearch;

/// Tavily settings. Without `TAVILY_API_KEY` search is disabled.
#[derive(Debug, Clone)]
pub struct EnvSearchConfig {
    pub tavily_api_key: Option<String>,
    pub tavily_base_url: String,
    pub max_results: usize,
}

impl EnvSearchConfig {
    pub fn from_env() -> Result<Self> {
        let tavily_api_key = env::var("TAVILY_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let tavily_base_url = env::var("TAVILY_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TAVILY_BASE_URL.to_string());
        let max_results = match env::var("SEARCH_MAX_RESULTS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("SEARCH_MAX_RESULTS is not a number: {}", raw))?,
            Err(_) => 5,
        };
        Ok(Self {
            tavily_api_key,
            tavily_base_url,
            max_results,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.tavily_api_key.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            anyhow::bail!("SEARCH_MAX_RESULTS must be greater than 0");
        }
        Ok(())
    }

    /// Builds the client, or `None` when no key is configured.
    pub fn build(&self) -> Option<TavilySearch> {
        self.tavily_api_key.as_ref().map(|key| {
            TavilySearch::new(key.clone())
                .with_base_url(self.tavily_base_url.clone())
                .with_max_results(self.max_results)
        })
    }
}
