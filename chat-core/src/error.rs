use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    /// Malformed input, rejected before anything is persisted.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Embedding, search or language-model call failed or timed out.
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Stable machine-readable code used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            ChatError::Validation(_) => "validation_error",
            ChatError::NotFound(_) => "not_found",
            ChatError::Upstream(_) => "upstream_unavailable",
            ChatError::Persistence(_) => "persistence_error",
            ChatError::Config(_) => "config_error",
            ChatError::Internal(_) => "internal_error",
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatError::Validation(_) | ChatError::NotFound(_))
    }
}

impl From<StorageError> for ChatError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => ChatError::NotFound(msg),
            StorageError::Validation(msg) => ChatError::Validation(msg),
            StorageError::Database(msg) => ChatError::Persistence(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_keep_their_category() {
        let not_found: ChatError = StorageError::NotFound("memory 42".into()).into();
        assert!(matches!(not_found, ChatError::NotFound(_)));
        assert!(not_found.is_client_error());

        let db: ChatError = StorageError::Database("disk full".into()).into();
        assert!(matches!(db, ChatError::Persistence(_)));
        assert!(!db.is_client_error());
        assert_eq!(db.code(), "persistence_error");
    }
}
