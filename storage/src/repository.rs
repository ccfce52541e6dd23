//! Store traits consumed by the context router and the HTTP layer.
//!
//! The SQLite repositories implement them; tests substitute their own doubles.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{
    ChatTurn, LongMemoryRecord, LongMemoryUpdate, MemoryStats, MemoryType, UserRecord,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StorageError::Validation`] when the email is already registered.
    async fn create_user(&self, user: &UserRecord) -> Result<(), StorageError>;
    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StorageError>;
    async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError>;
}

#[async_trait]
pub trait ChatTurnStore: Send + Sync {
    /// Appends a turn. Fails with [`StorageError::NotFound`] for an unknown user.
    async fn save_turn(&self, turn: &ChatTurn) -> Result<(), StorageError>;

    /// Most recent turns first.
    async fn recent_turns(&self, user_id: &str, limit: i64)
        -> Result<Vec<ChatTurn>, StorageError>;
}

/// Long-term memory persistence. Reads are scoped by `user_id` where one is taken;
/// id-addressed operations are not ownership-checked here.
#[async_trait]
pub trait LongMemoryStore: Send + Sync {
    /// Fails with [`StorageError::NotFound`] for an unknown user.
    async fn create(&self, record: &LongMemoryRecord) -> Result<(), StorageError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<LongMemoryRecord>, StorageError>;

    async fn get_recent(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<LongMemoryRecord>, StorageError>;

    async fn get_all(&self, user_id: &str) -> Result<Vec<LongMemoryRecord>, StorageError>;

    async fn get_by_type(
        &self,
        user_id: &str,
        memory_type: MemoryType,
        limit: Option<i64>,
    ) -> Result<Vec<LongMemoryRecord>, StorageError>;

    /// `importance_score >= min_importance`, most important first.
    async fn get_important(
        &self,
        user_id: &str,
        min_importance: f64,
        limit: i64,
    ) -> Result<Vec<LongMemoryRecord>, StorageError>;

    /// Case-insensitive substring match over content.
    async fn search(
        &self,
        user_id: &str,
        term: &str,
        limit: i64,
    ) -> Result<Vec<LongMemoryRecord>, StorageError>;

    /// Refreshes `last_used_at`. Returns false when the entry does not exist.
    async fn touch(&self, id: &str) -> Result<bool, StorageError>;

    /// Stores the clamped value and touches `last_used_at`; `None` when absent.
    async fn update_importance(
        &self,
        id: &str,
        importance: f64,
    ) -> Result<Option<LongMemoryRecord>, StorageError>;

    async fn update(
        &self,
        id: &str,
        changes: &LongMemoryUpdate,
    ) -> Result<Option<LongMemoryRecord>, StorageError>;

    /// Returns false when nothing was deleted.
    async fn delete(&self, id: &str) -> Result<bool, StorageError>;

    /// Deletes entries older than `days_old` days whose importance is below `min_importance`.
    async fn delete_old(
        &self,
        user_id: &str,
        days_old: i64,
        min_importance: f64,
    ) -> Result<u64, StorageError>;

    async fn delete_all(&self, user_id: &str) -> Result<u64, StorageError>;

    async fn stats(&self, user_id: &str) -> Result<MemoryStats, StorageError>;
}
