//! LLM configuration: trait and env-based implementation.

use anyhow::{bail, Context, Result};
use std::env;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn temperature(&self) -> f32 {
        self.llm_temperature
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// `LLM_MODEL` wins over the legacy `MODEL`; temperature defaults to 0.3.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let llm_model = env::var("LLM_MODEL")
            .or_else(|_| env::var("MODEL"))
            .unwrap_or_else(|_| crate::openai_llm::DEFAULT_MODEL.to_string());
        let llm_temperature = match env::var("LLM_TEMPERATURE") {
            Ok(raw) => raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("LLM_TEMPERATURE is not a number: {}", raw))?,
            Err(_) => 0.3,
        };

        let config = Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_temperature,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            bail!("OPENAI_API_KEY is empty");
        }
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            bail!(
                "LLM_TEMPERATURE must be within [0, 2], got {}",
                self.llm_temperature
            );
        }
        Ok(())
    }
}
