//! OpenAI 实现的 LlmClient：包装 openai-client，消息原样转换后发送。

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{CompletionOptions, OpenAIClient};
use prompt::ChatMessage;
use tracing::{info, instrument};

use super::{chat_message_to_openai, LlmClient};
use crate::config::LlmConfig;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: OpenAIClient,
    options: CompletionOptions,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            options: CompletionOptions::new(DEFAULT_MODEL),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            options: CompletionOptions::new(DEFAULT_MODEL),
        }
    }

    /// Builds a client from any [`LlmConfig`].
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_temperature(config.temperature())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.options.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.options.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.options.model))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;

        let completion = self
            .client
            .chat_completion(&self.options, openai_messages)
            .await?;

        info!(
            reply_len = completion.content.len(),
            total_tokens = completion.usage.map(|u| u.total_tokens).unwrap_or_default(),
            "LLM reply received"
        );
        Ok(completion.content)
    }
}
