//! Router tunables, persona and intent table from env.

use anyhow::{bail, Result};
use chat_router::RouterSettings;
use intent::{IntentClassifier, KeywordTable};
use prompt::Persona;
use std::time::Duration;

use super::{env_opt, env_parse};

#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub settings: RouterSettings,
    /// BOT_NAME / CREATOR_NAME
    pub persona: Persona,
    /// INTENT_TABLE_PATH; built-in table when unset
    pub intent_table_path: Option<String>,
}

impl RouterConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = RouterSettings::default();
        let settings = RouterSettings {
            history_limit: env_parse("HISTORY_LIMIT", defaults.history_limit)?,
            retrieval_top_k: env_parse("RETRIEVAL_TOP_K", defaults.retrieval_top_k)?,
            llm_timeout: Duration::from_secs(env_parse("LLM_TIMEOUT_SECS", 60u64)?),
            search_timeout: Duration::from_secs(env_parse("SEARCH_TIMEOUT_SECS", 15u64)?),
            retrieval_timeout: Duration::from_secs(env_parse("RETRIEVAL_TIMEOUT_SECS", 30u64)?),
            annotate_search_with_date: env_parse(
                "ANNOTATE_SEARCH_WITH_DATE",
                defaults.annotate_search_with_date,
            )?,
            record_long_memory: env_parse("RECORD_LONG_MEMORY", defaults.record_long_memory)?,
            long_memory_context_limit: env_parse(
                "LONG_MEMORY_CONTEXT_LIMIT",
                defaults.long_memory_context_limit,
            )?,
            long_memory_min_importance: env_parse(
                "LONG_MEMORY_MIN_IMPORTANCE",
                defaults.long_memory_min_importance,
            )?,
            long_memory_recent_limit: env_parse(
                "LONG_MEMORY_RECENT_LIMIT",
                defaults.long_memory_recent_limit,
            )?,
        };
        let fallback = Persona::default();
        let persona = Persona::new(
            env_opt("BOT_NAME").unwrap_or(fallback.bot_name),
            env_opt("CREATOR_NAME").unwrap_or(fallback.creator_name),
        );
        Ok(Self {
            settings,
            persona,
            intent_table_path: env_opt("INTENT_TABLE_PATH"),
        })
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.settings;
        if s.retrieval_top_k == 0 {
            bail!("RETRIEVAL_TOP_K must be greater than 0");
        }
        if s.long_memory_min_importance.is_nan()
            || !(0.0..=1.0).contains(&s.long_memory_min_importance)
        {
            bail!(
                "LONG_MEMORY_MIN_IMPORTANCE must be within [0, 1], got {}",
                s.long_memory_min_importance
            );
        }
        for (name, timeout) in [
            ("LLM_TIMEOUT_SECS", s.llm_timeout),
            ("SEARCH_TIMEOUT_SECS", s.search_timeout),
            ("RETRIEVAL_TIMEOUT_SECS", s.retrieval_timeout),
        ] {
            if timeout.is_zero() {
                bail!("{} must be greater than 0", name);
            }
        }
        Ok(())
    }

    /// Classifier over the configured table, or the built-in one.
    pub fn classifier(&self) -> Result<IntentClassifier> {
        let table = match &self.intent_table_path {
            Some(path) => KeywordTable::from_json_file(path)?,
            None => KeywordTable::default(),
        };
        Ok(IntentClassifier::new(table))
    }
}
