//! Long-term memory repository (SQLite).
//!
//! Rows are mapped by hand because `role`, `memory_type` and `metadata` are stored
//! as TEXT and parsed back into their typed forms.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{
    clamp_importance, LongMemoryRecord, LongMemoryUpdate, MemoryStats, MemoryType,
};
use crate::repository::LongMemoryStore;
use crate::sqlite_pool::SqlitePoolManager;
use crate::user_repo::ensure_user_exists;

const COLUMNS: &str = "id, user_id, role, content, memory_type, importance_score, metadata, created_at, last_used_at";

#[derive(Clone)]
pub struct LongMemoryRepository {
    pool_manager: SqlitePoolManager,
}

impl LongMemoryRepository {
    pub fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    fn row_to_record(row: &SqliteRow) -> Result<LongMemoryRecord, StorageError> {
        let role: String = row.try_get("role")?;
        let memory_type: String = row.try_get("memory_type")?;
        let metadata: String = row.try_get("metadata")?;
        let metadata: Map<String, Value> = match serde_json::from_str(&metadata)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Ok(LongMemoryRecord {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            role: role.parse()?,
            content: row.try_get("content")?,
            memory_type: memory_type.parse()?,
            importance_score: row.try_get("importance_score")?,
            metadata,
            created_at: row.try_get("created_at")?,
            last_used_at: row.try_get("last_used_at")?,
        })
    }

    fn rows_to_records(rows: &[SqliteRow]) -> Result<Vec<LongMemoryRecord>, StorageError> {
        rows.iter().map(Self::row_to_record).collect()
    }
}

/// Case-insensitive substring match. SQLite's `LOWER` only folds ASCII, so folding happens here.
pub(crate) fn contains_folded(content: &str, term: &str) -> bool {
    content.to_lowercase().contains(&term.to_lowercase())
}

/// `now - days_old`, or a validation error when the cutoff is not representable.
pub(crate) fn cutoff_for(now: DateTime<Utc>, days_old: i64) -> Result<DateTime<Utc>, StorageError> {
    Duration::try_days(days_old)
        .and_then(|age| now.checked_sub_signed(age))
        .ok_or_else(|| StorageError::Validation(format!("days_old {} is out of range", days_old)))
}

#[async_trait]
impl LongMemoryStore for LongMemoryRepository {
    async fn create(&self, record: &LongMemoryRecord) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();
        ensure_user_exists(pool, &record.user_id).await?;

        let metadata = serde_json::to_string(&record.metadata)?;
        sqlx::query(&format!(
            "INSERT INTO long_memories ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            COLUMNS
        ))
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(record.role.as_str())
        .bind(&record.content)
        .bind(record.memory_type.as_str())
        .bind(clamp_importance(record.importance_score))
        .bind(metadata)
        .bind(record.created_at)
        .bind(record.last_used_at)
        .execute(pool)
        .await?;

        info!(
            "Saved long memory: id={}, user_id={}, type={}",
            record.id, record.user_id, record.memory_type
        );
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<LongMemoryRecord>, StorageError> {
        let row = sqlx::query(&format!("SELECT {} FROM long_memories WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn get_recent(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<LongMemoryRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM long_memories WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
            COLUMNS
        ))
        .bind(user_id)
        .bind(limit.max(0))
        .fetch_all(self.pool_manager.pool())
        .await?;
        Self::rows_to_records(&rows)
    }

    async fn get_all(&self, user_id: &str) -> Result<Vec<LongMemoryRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM long_memories WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
            COLUMNS
        ))
        .bind(user_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Self::rows_to_records(&rows)
    }

    async fn get_by_type(
        &self,
        user_id: &str,
        memory_type: MemoryType,
        limit: Option<i64>,
    ) -> Result<Vec<LongMemoryRecord>, StorageError> {
        let mut sql = format!(
            "SELECT {} FROM long_memories WHERE user_id = ? AND memory_type = ? ORDER BY created_at DESC, rowid DESC",
            COLUMNS
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit.max(0)));
        }

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(memory_type.as_str())
            .fetch_all(self.pool_manager.pool())
            .await?;
        Self::rows_to_records(&rows)
    }

    async fn get_important(
        &self,
        user_id: &str,
        min_importance: f64,
        limit: i64,
    ) -> Result<Vec<LongMemoryRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM long_memories
            WHERE user_id = ? AND importance_score >= ?
            ORDER BY importance_score DESC, created_at DESC
            LIMIT ?
            "#,
            COLUMNS
        ))
        .bind(user_id)
        .bind(min_importance)
        .bind(limit.max(0))
        .fetch_all(self.pool_manager.pool())
        .await?;
        Self::rows_to_records(&rows)
    }

    async fn search(
        &self,
        user_id: &str,
        term: &str,
        limit: i64,
    ) -> Result<Vec<LongMemoryRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM long_memories
            WHERE user_id = ?
            ORDER BY importance_score DESC, created_at DESC
            "#,
            COLUMNS
        ))
        .bind(user_id)
        .fetch_all(self.pool_manager.pool())
        .await?;

        let mut found = Vec::new();
        for row in &rows {
            if found.len() as i64 >= limit {
                break;
            }
            let record = Self::row_to_record(row)?;
            if contains_folded(&record.content, term) {
                found.push(record);
            }
        }

        info!("Found {} memories matching '{}'", found.len(), term);
        Ok(found)
    }

    async fn touch(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE long_memories SET last_used_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool_manager.pool())
            .await?;
        debug!("Touched long memory {}: {}", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn update_importance(
        &self,
        id: &str,
        importance: f64,
    ) -> Result<Option<LongMemoryRecord>, StorageError> {
        let result = sqlx::query(
            "UPDATE long_memories SET importance_score = ?, last_used_at = ? WHERE id = ?",
        )
        .bind(clamp_importance(importance))
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool_manager.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    async fn update(
        &self,
        id: &str,
        changes: &LongMemoryUpdate,
    ) -> Result<Option<LongMemoryRecord>, StorageError> {
        let mut assignments = vec!["last_used_at = ?"];
        if changes.content.is_some() {
            assignments.push("content = ?");
        }
        if changes.memory_type.is_some() {
            assignments.push("memory_type = ?");
        }
        if changes.importance_score.is_some() {
            assignments.push("importance_score = ?");
        }
        if changes.metadata.is_some() {
            assignments.push("metadata = ?");
        }
        let sql = format!(
            "UPDATE long_memories SET {} WHERE id = ?",
            assignments.join(", ")
        );

        let metadata = changes
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut query = sqlx::query(&sql).bind(Utc::now());
        if let Some(content) = &changes.content {
            query = query.bind(content.clone());
        }
        if let Some(memory_type) = changes.memory_type {
            query = query.bind(memory_type.as_str());
        }
        if let Some(importance) = changes.importance_score {
            query = query.bind(clamp_importance(importance));
        }
        if let Some(metadata) = metadata {
            query = query.bind(metadata);
        }

        let result = query.bind(id).execute(self.pool_manager.pool()).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM long_memories WHERE id = ?")
            .bind(id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_old(
        &self,
        user_id: &str,
        days_old: i64,
        min_importance: f64,
    ) -> Result<u64, StorageError> {
        let cutoff = cutoff_for(Utc::now(), days_old)?;

        let result = sqlx::query(
            r#"
            DELETE FROM long_memories
            WHERE user_id = ? AND created_at < ? AND importance_score < ?
            "#,
        )
        .bind(user_id)
        .bind(cutoff)
        .bind(min_importance)
        .execute(self.pool_manager.pool())
        .await?;

        info!(
            "Deleted {} memories of user {} older than {} days below importance {}",
            result.rows_affected(),
            user_id,
            days_old,
            min_importance
        );
        Ok(result.rows_affected())
    }

    async fn delete_all(&self, user_id: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM long_memories WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;

        info!(
            "Deleted all {} memories of user {}",
            result.rows_affected(),
            user_id
        );
        Ok(result.rows_affected())
    }

    async fn stats(&self, user_id: &str) -> Result<MemoryStats, StorageError> {
        let pool = self.pool_manager.pool();

        let (total_memories, average_importance, most_recent_memory): (
            i64,
            Option<f64>,
            Option<DateTime<Utc>>,
        ) = sqlx::query_as(
            r#"
            SELECT COUNT(*), AVG(importance_score), MAX(created_at)
            FROM long_memories WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        let per_type: Vec<(String, i64)> = sqlx::query_as(
            "SELECT memory_type, COUNT(*) FROM long_memories WHERE user_id = ? GROUP BY memory_type",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let average_importance = average_importance
            .map(|avg| (avg * 100.0).round() / 100.0)
            .unwrap_or(0.0);

        Ok(MemoryStats {
            total_memories,
            memory_types: per_type.into_iter().collect::<BTreeMap<_, _>>(),
            average_importance,
            most_recent_memory,
        })
    }
}
