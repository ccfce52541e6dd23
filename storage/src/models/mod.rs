mod chat_turn;
mod long_memory;
mod memory_stats;
mod user;

pub use chat_turn::ChatTurn;
pub use long_memory::{
    clamp_importance, LongMemoryRecord, LongMemoryUpdate, MemoryRole, MemoryType,
    DEFAULT_IMPORTANCE,
};
pub use memory_stats::MemoryStats;
pub use user::UserRecord;
