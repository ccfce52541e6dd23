//! Storage crate: durable memory store for the chat backend.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, ChatTurn, LongMemoryRecord and friends, MemoryStats
//! - [`repository`] – UserStore, ChatTurnStore and LongMemoryStore traits
//! - [`user_repo`], [`chat_turn_repo`], [`long_memory_repo`] – SQLite implementations
//! - [`schema`] – idempotent table creation
//! - [`sqlite_pool`] – SqlitePoolManager

mod chat_turn_repo;
mod error;
mod long_memory_repo;
mod models;
mod repository;
mod schema;
mod sqlite_pool;
mod user_repo;


pub use chat_turn_repo::ChatTurnRepository;
pub use error::StorageError;
pub use long_memory_repo::LongMemoryRepository;
pub use models::{
    clamp_importance, ChatTurn, LongMemoryRecord, LongMemoryUpdate, MemoryRole, MemoryStats,
    MemoryType, UserRecord, DEFAULT_IMPORTANCE,
};
pub use repository::{ChatTurnStore, LongMemoryStore, UserStore};
pub use schema::init_schema;
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::UserRepository;
