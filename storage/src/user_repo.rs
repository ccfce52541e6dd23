use async_trait::async_trait;
use tracing::info;

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::repository::UserStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct UserRepository {
    pool_manager: SqlitePoolManager,
}

impl UserRepository {
    pub fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }
}

/// Errors out with NotFound unless a user with `user_id` exists.
pub(crate) async fn ensure_user_exists(
    pool: &sqlx::SqlitePool,
    user_id: &str,
) -> Result<(), StorageError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    if count == 0 {
        return Err(StorageError::NotFound(format!("user {}", user_id)));
    }
    Ok(())
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let result = sqlx::query(
            "INSERT INTO users (id, name, email, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.created_at)
        .execute(self.pool_manager.pool())
        .await;

        match result {
            Ok(_) => {
                info!("Created user: id={}", user.id);
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                StorageError::Validation(format!("email {} is already registered", user.email)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError> {
        let users = sqlx::query_as::<_, UserRecord>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(self.pool_manager.pool())
            .await?;
        Ok(users)
    }
}
