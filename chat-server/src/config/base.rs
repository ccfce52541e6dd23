//! Base config: bind address, logging, database. Loaded from env.

use anyhow::{bail, Result};
use std::net::SocketAddr;

use super::{env_opt, env_parse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// DATABASE_URL: users, chat turns and long-term memories
    pub database_url: String,
    /// BIND_ADDR
    pub bind_addr: SocketAddr,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
    /// LOG_FORMAT: text | json
    pub log_format: LogFormat,
}

impl BaseConfig {
    pub fn from_env() -> Result<Self> {
        let database_url =
            env_opt("DATABASE_URL").unwrap_or_else(|| "sqlite:./chat.db".to_string());
        let bind_addr = env_parse("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8080)))?;
        let log_file = env_opt("LOG_FILE");
        let log_format = match env_opt("LOG_FORMAT")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("LOG_FORMAT must be text or json, got {}", other),
        };
        Ok(Self {
            database_url,
            bind_addr,
            log_file,
            log_format,
        })
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == LogFormat::Json
    }
}
