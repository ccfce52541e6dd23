//! Chat turn repository: append-only question/answer history per user.

use async_trait::async_trait;
use tracing::info;

use crate::error::StorageError;
use crate::models::ChatTurn;
use crate::repository::ChatTurnStore;
use crate::sqlite_pool::SqlitePoolManager;
use crate::user_repo::ensure_user_exists;

#[derive(Clone)]
pub struct ChatTurnRepository {
    pool_manager: SqlitePoolManager,
}

impl ChatTurnRepository {
    pub fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }
}

#[async_trait]
impl ChatTurnStore for ChatTurnRepository {
    async fn save_turn(&self, turn: &ChatTurn) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();
        ensure_user_exists(pool, &turn.user_id).await?;

        sqlx::query(
            r#"
            INSERT INTO chat_turns (id, user_id, question, answer, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&turn.id)
        .bind(&turn.user_id)
        .bind(&turn.question)
        .bind(&turn.answer)
        .bind(turn.created_at)
        .execute(pool)
        .await?;

        info!("Saved chat turn: id={}, user_id={}", turn.id, turn.user_id);
        Ok(())
    }

    async fn recent_turns(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatTurn>, StorageError> {
        let turns = sqlx::query_as::<_, ChatTurn>(
            r#"
            SELECT id, user_id, question, answer, created_at FROM chat_turns
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit.max(0))
        .fetch_all(self.pool_manager.pool())
        .await?;

        info!("Retrieved {} recent turns for user {}", turns.len(), user_id);
        Ok(turns)
    }
}
