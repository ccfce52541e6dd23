//! Vector store selection for the similarity retriever.

use anyhow::{bail, Result};

use super::{env_opt, env_parse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorStoreKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone)]
pub struct VectorStoreConfig {
    /// VECTOR_STORE_TYPE: sqlite | memory
    pub kind: VectorStoreKind,
    /// VECTOR_STORE_PATH (sqlite only)
    pub path: String,
    /// RETRIEVAL_MIN_SCORE: hits below this cosine score are dropped
    pub min_score: f32,
}

impl VectorStoreConfig {
    pub fn from_env() -> Result<Self> {
        let kind = match env_opt("VECTOR_STORE_TYPE")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("sqlite") => VectorStoreKind::Sqlite,
            Some("memory") => VectorStoreKind::Memory,
            Some(other) => bail!("VECTOR_STORE_TYPE must be sqlite or memory, got {}", other),
        };
        let path = env_opt("VECTOR_STORE_PATH").unwrap_or_else(|| "./vectors.db".to_string());
        let min_score = env_parse("RETRIEVAL_MIN_SCORE", 0.0f32)?;
        Ok(Self {
            kind,
            path,
            min_score,
        })
    }
}
