//! Server configuration: BaseConfig (bind, log, DB) + VectorStoreConfig + RouterConfig, plus the
//! provider configs owned by their crates (LLM, embedding, web search).

mod app_config;
mod base;
mod router;
mod vector_store;

#[cfg(test)]
mod tests;

pub use app_config::AppConfig;
pub use base::{BaseConfig, LogFormat};
pub use router::RouterConfig;
pub use vector_store::{VectorStoreConfig, VectorStoreKind};

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Reads and parses an optional env var; unset or blank means `default`.
pub(crate) fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        _ => Ok(default),
    }
}

/// Non-blank env var, or `None`.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}
