//! AppConfig: every config group the server needs. Use load() for env-based loading.

use anyhow::Result;
use embedding::EnvEmbeddingConfig;
use llm_client::EnvLlmConfig;
use web_search::EnvSearchConfig;

use super::{BaseConfig, RouterConfig, VectorStoreConfig};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub embedding: EnvEmbeddingConfig,
    pub search: EnvSearchConfig,
    pub vector_store: VectorStoreConfig,
    pub router: RouterConfig,
}

impl AppConfig {
    /// Loads every group from the environment and validates the result.
    pub fn load() -> Result<Self> {
        let config = Self {
            base: BaseConfig::from_env()?,
            llm: EnvLlmConfig::from_env()?,
            embedding: EnvEmbeddingConfig::from_env()?,
            search: EnvSearchConfig::from_env()?,
            vector_store: VectorStoreConfig::from_env()?,
            router: RouterConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.llm.validate()?;
        self.embedding.validate()?;
        self.search.validate()?;
        self.router.validate()
    }
}
