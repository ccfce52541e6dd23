//! Config tests.

use super::{AppConfig, LogFormat, VectorStoreKind};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::time::Duration;

const VARS: &[&str] = &[
    "DATABASE_URL",
    "BIND_ADDR",
    "LOG_FILE",
    "LOG_FORMAT",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "LLM_MODEL",
    "MODEL",
    "LLM_TEMPERATURE",
    "EMBEDDING_MODEL",
    "EMBEDDING_TIMEOUT_SECS",
    "TAVILY_API_KEY",
    "TAVILY_BASE_URL",
    "SEARCH_MAX_RESULTS",
    "VECTOR_STORE_TYPE",
    "VECTOR_STORE_PATH",
    "RETRIEVAL_MIN_SCORE",
    "BOT_NAME",
    "CREATOR_NAME",
    "HISTORY_LIMIT",
    "RETRIEVAL_TOP_K",
    "LLM_TIMEOUT_SECS",
    "SEARCH_TIMEOUT_SECS",
    "RETRIEVAL_TIMEOUT_SECS",
    "ANNOTATE_SEARCH_WITH_DATE",
    "RECORD_LONG_MEMORY",
    "LONG_MEMORY_CONTEXT_LIMIT",
    "LONG_MEMORY_MIN_IMPORTANCE",
    "LONG_MEMORY_RECENT_LIMIT",
    "INTENT_TABLE_PATH",
];

fn clear_env() {
    for key in VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-test-key-123456");

    let config = AppConfig::load().unwrap();

    assert_eq!(config.base.database_url, "sqlite:./chat.db");
    assert_eq!(config.base.bind_addr.to_string(), "127.0.0.1:8080");
    assert!(config.base.log_file.is_none());
    assert_eq!(config.base.log_format, LogFormat::Text);
    assert_eq!(config.llm.llm_model, "gpt-4o-mini");
    assert_eq!(config.llm.openai_base_url, "https://api.openai.com/v1");
    assert!(!config.search.is_enabled());
    assert_eq!(config.vector_store.kind, VectorStoreKind::Sqlite);
    assert_eq!(config.vector_store.path, "./vectors.db");
    assert_eq!(config.vector_store.min_score, 0.0);

    let router = &config.router;
    assert_eq!(router.persona.bot_name, "Sharma Ji");
    assert_eq!(router.settings.history_limit, 10);
    assert_eq!(router.settings.retrieval_top_k, 3);
    assert_eq!(router.settings.llm_timeout, Duration::from_secs(60));
    assert_eq!(router.settings.search_timeout, Duration::from_secs(15));
    assert!(router.settings.annotate_search_with_date);
    assert!(router.settings.record_long_memory);
    assert_eq!(router.settings.long_memory_min_importance, 0.7);
    assert_eq!(router.settings.long_memory_recent_limit, 5);
    assert!(router.intent_table_path.is_none());

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-test-key-123456");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("BIND_ADDR", "0.0.0.0:9000");
    env::set_var("LOG_FORMAT", "JSON");
    env::set_var("MODEL", "legacy-model");
    env::set_var("TAVILY_API_KEY", "tvly-abc");
    env::set_var("VECTOR_STORE_TYPE", "memory");
    env::set_var("BOT_NAME", "Guru");
    env::set_var("RETRIEVAL_TOP_K", "5");
    env::set_var("RECORD_LONG_MEMORY", "false");
    env::set_var("LONG_MEMORY_RECENT_LIMIT", "0");

    let config = AppConfig::load().unwrap();

    assert_eq!(config.base.database_url, "sqlite::memory:");
    assert_eq!(config.base.bind_addr.port(), 9000);
    assert!(config.base.json_logs());
    assert_eq!(config.llm.llm_model, "legacy-model");
    assert!(config.search.is_enabled());
    assert_eq!(config.vector_store.kind, VectorStoreKind::Memory);
    assert_eq!(config.router.persona.bot_name, "Guru");
    assert_eq!(config.router.persona.creator_name, "the team");
    assert_eq!(config.router.settings.retrieval_top_k, 5);
    assert!(!config.router.settings.record_long_memory);
    assert_eq!(config.router.settings.long_memory_recent_limit, 0);

    clear_env();
}

#[test]
#[serial]
fn test_load_config_rejects_invalid_values() {
    clear_env();
    assert!(AppConfig::load().is_err(), "missing OPENAI_API_KEY");

    env::set_var("OPENAI_API_KEY", "sk-test-key-123456");
    for (key, value) in [
        ("LLM_TEMPERATURE", "2.5"),
        ("RETRIEVAL_TOP_K", "0"),
        ("VECTOR_STORE_TYPE", "lance"),
        ("LONG_MEMORY_MIN_IMPORTANCE", "1.2"),
        ("LOG_FORMAT", "xml"),
        ("HISTORY_LIMIT", "ten"),
    ] {
        env::set_var(key, value);
        assert!(AppConfig::load().is_err(), "{}={} should be rejected", key, value);
        env::remove_var(key);
    }
    assert!(AppConfig::load().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_intent_table_override() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-test-key-123456");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"realtime_keywords": ["cricket"]}}"#).unwrap();
    env::set_var("INTENT_TABLE_PATH", file.path());

    let config = AppConfig::load().unwrap();
    let classifier = config.router.classifier().unwrap();
    assert_eq!(classifier.classify("cricket"), intent::Intent::Realtime);
    assert_eq!(classifier.classify("sensex"), intent::Intent::Default);

    env::set_var("INTENT_TABLE_PATH", "/nonexistent/table.json");
    let config = AppConfig::load().unwrap();
    assert!(config.router.classifier().is_err());

    clear_env();
}
