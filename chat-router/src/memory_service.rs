//! Long-term memory operations as exposed to API callers.
//!
//! Wraps a [`LongMemoryStore`] with input validation, defaults and ownership checks:
//! a memory addressed by id is only returned to the user that owns it.

use std::sync::Arc;

use chat_core::{ChatError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use storage::{
    LongMemoryRecord, LongMemoryStore, LongMemoryUpdate, MemoryRole, MemoryStats, MemoryType,
    DEFAULT_IMPORTANCE,
};
use tracing::info;

pub const DEFAULT_MIN_IMPORTANCE: f64 = 0.7;
pub const DEFAULT_IMPORTANT_LIMIT: i64 = 20;
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
pub const DEFAULT_CLEANUP_DAYS: i64 = 90;
pub const DEFAULT_CLEANUP_MIN_IMPORTANCE: f64 = 0.3;

/// Input for [`LongMemoryService::create`]. Role and type arrive as strings and are parsed here.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMemory {
    pub content: String,
    pub role: String,
    pub memory_type: String,
    #[serde(default)]
    pub importance_score: Option<f64>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Input for [`LongMemoryService::update`]; absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryPatch {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub memory_type: Option<String>,
    #[serde(default)]
    pub importance_score: Option<f64>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

#[derive(Clone)]
pub struct LongMemoryService {
    store: Arc<dyn LongMemoryStore>,
}

impl LongMemoryService {
    pub fn new(store: Arc<dyn LongMemoryStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user_id: &str, input: NewMemory) -> Result<LongMemoryRecord> {
        let role: MemoryRole = input.role.parse()?;
        let memory_type: MemoryType = input.memory_type.parse()?;
        let content = non_empty_content(&input.content)?;
        let importance = match input.importance_score {
            Some(score) => check_importance(score)?,
            None => DEFAULT_IMPORTANCE,
        };

        let record = LongMemoryRecord::new(user_id, role, content, memory_type)
            .with_importance(importance)
            .with_metadata(input.metadata.unwrap_or_default());
        self.store.create(&record).await?;
        info!(user_id, memory_id = %record.id, memory_type = %record.memory_type, "memory created");
        Ok(record)
    }

    /// The entry if it exists and belongs to `user_id`; `NotFound` otherwise.
    pub async fn owned(&self, user_id: &str, memory_id: &str) -> Result<LongMemoryRecord> {
        match self.store.get_by_id(memory_id).await? {
            Some(record) if record.user_id == user_id => Ok(record),
            _ => Err(ChatError::NotFound(format!("memory {}", memory_id))),
        }
    }

    /// Owned lookup that also refreshes `last_used_at`.
    pub async fn get(&self, user_id: &str, memory_id: &str) -> Result<LongMemoryRecord> {
        let mut record = self.owned(user_id, memory_id).await?;
        self.store.touch(memory_id).await?;
        if let Some(fresh) = self.store.get_by_id(memory_id).await? {
            record = fresh;
        }
        Ok(record)
    }

    /// Most recent entries; each returned entry is touched.
    pub async fn recent(&self, user_id: &str, limit: i64) -> Result<Vec<LongMemoryRecord>> {
        let limit = positive_limit(limit)?;
        let records = self.store.get_recent(user_id, limit).await?;
        for record in &records {
            self.store.touch(&record.id).await?;
        }
        Ok(records)
    }

    pub async fn all(&self, user_id: &str) -> Result<Vec<LongMemoryRecord>> {
        Ok(self.store.get_all(user_id).await?)
    }

    pub async fn by_type(
        &self,
        user_id: &str,
        memory_type: &str,
        limit: Option<i64>,
    ) -> Result<Vec<LongMemoryRecord>> {
        let memory_type: MemoryType = memory_type.parse()?;
        let limit = limit.map(positive_limit).transpose()?;
        Ok(self.store.get_by_type(user_id, memory_type, limit).await?)
    }

    pub async fn important(
        &self,
        user_id: &str,
        min_importance: Option<f64>,
        limit: Option<i64>,
    ) -> Result<Vec<LongMemoryRecord>> {
        let min_importance = check_threshold(min_importance.unwrap_or(DEFAULT_MIN_IMPORTANCE))?;
        let limit = positive_limit(limit.unwrap_or(DEFAULT_IMPORTANT_LIMIT))?;
        Ok(self.store.get_important(user_id, min_importance, limit).await?)
    }

    pub async fn search(
        &self,
        user_id: &str,
        term: &str,
        limit: Option<i64>,
    ) -> Result<Vec<LongMemoryRecord>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ChatError::Validation("search term must not be empty".to_string()));
        }
        let limit = positive_limit(limit.unwrap_or(DEFAULT_SEARCH_LIMIT))?;
        Ok(self.store.search(user_id, term, limit).await?)
    }

    /// Out-of-range values are clamped into `[0, 1]` by the store.
    pub async fn update_importance(
        &self,
        user_id: &str,
        memory_id: &str,
        importance: f64,
    ) -> Result<LongMemoryRecord> {
        self.owned(user_id, memory_id).await?;
        self.store
            .update_importance(memory_id, importance)
            .await?
            .ok_or_else(|| ChatError::NotFound(format!("memory {}", memory_id)))
    }

    pub async fn update(
        &self,
        user_id: &str,
        memory_id: &str,
        patch: MemoryPatch,
    ) -> Result<LongMemoryRecord> {
        let changes = LongMemoryUpdate {
            content: patch
                .content
                .as_deref()
                .map(non_empty_content)
                .transpose()?,
            memory_type: patch
                .memory_type
                .as_deref()
                .map(str::parse::<MemoryType>)
                .transpose()?,
            importance_score: patch.importance_score.map(check_importance).transpose()?,
            metadata: patch.metadata,
        };
        if changes.is_empty() {
            return Err(ChatError::Validation("no fields to update".to_string()));
        }

        self.owned(user_id, memory_id).await?;
        self.store
            .update(memory_id, &changes)
            .await?
            .ok_or_else(|| ChatError::NotFound(format!("memory {}", memory_id)))
    }

    /// Safe to repeat: a second call reports `NotFound` instead of failing.
    pub async fn delete(&self, user_id: &str, memory_id: &str) -> Result<DeleteOutcome> {
        match self.owned(user_id, memory_id).await {
            Ok(_) => {}
            Err(ChatError::NotFound(_)) => return Ok(DeleteOutcome::NotFound),
            Err(e) => return Err(e),
        }
        if self.store.delete(memory_id).await? {
            info!(user_id, memory_id, "memory deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    /// Deletes entries older than `days_old` days AND below `min_importance`.
    pub async fn delete_old(
        &self,
        user_id: &str,
        days_old: Option<i64>,
        min_importance: Option<f64>,
    ) -> Result<u64> {
        let days_old = days_old.unwrap_or(DEFAULT_CLEANUP_DAYS);
        if days_old < 0 {
            return Err(ChatError::Validation("days_old must not be negative".to_string()));
        }
        let min_importance =
            check_threshold(min_importance.unwrap_or(DEFAULT_CLEANUP_MIN_IMPORTANCE))?;
        let deleted = self.store.delete_old(user_id, days_old, min_importance).await?;
        info!(user_id, days_old, min_importance, deleted, "old memories cleaned up");
        Ok(deleted)
    }

    /// Irreversible; refused unless `confirm` is set.
    pub async fn delete_all(&self, user_id: &str, confirm: bool) -> Result<u64> {
        if !confirm {
            return Err(ChatError::Validation(
                "deleting all memories requires confirm=true".to_string(),
            ));
        }
        let deleted = self.store.delete_all(user_id).await?;
        info!(user_id, deleted, "all memories deleted");
        Ok(deleted)
    }

    pub async fn stats(&self, user_id: &str) -> Result<MemoryStats> {
        Ok(self.store.stats(user_id).await?)
    }
}

fn non_empty_content(content: &str) -> Result<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ChatError::Validation("content must not be empty".to_string()));
    }
    Ok(content.to_string())
}

fn check_importance(score: f64) -> Result<f64> {
    if score.is_nan() || !(0.0..=1.0).contains(&score) {
        return Err(ChatError::Validation(format!(
            "importance_score must be between 0 and 1 (got {})",
            score
        )));
    }
    Ok(score)
}

fn check_threshold(value: f64) -> Result<f64> {
    if value.is_nan() || !(0.0..=1.0).contains(&value) {
        return Err(ChatError::Validation(format!(
            "min_importance must be between 0 and 1 (got {})",
            value
        )));
    }
    Ok(value)
}

fn positive_limit(limit: i64) -> Result<i64> {
    if limit <= 0 {
        return Err(ChatError::Validation("limit must be greater than 0".to_string()));
    }
    Ok(limit)
}
