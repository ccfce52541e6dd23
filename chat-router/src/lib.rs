//! # Chat router
//!
//! - [`ContextRouter`]: `respond(user_id, message)` picks a path (clock, web search,
//!   similarity retrieval), builds the model-facing messages, calls the LLM and records the turn
//! - [`LongMemoryService`]: validation and ownership checks over the long-term memory store
//! - [`Clock`]: wall-clock source, swappable in tests

mod clock;
mod memory_service;
mod router;
mod settings;

pub use clock::{Clock, DateTimeInfo, FixedClock, SystemClock};
pub use memory_service::{
    DeleteOutcome, LongMemoryService, MemoryPatch, NewMemory, DEFAULT_CLEANUP_DAYS,
    DEFAULT_CLEANUP_MIN_IMPORTANCE, DEFAULT_IMPORTANT_LIMIT, DEFAULT_MIN_IMPORTANCE,
    DEFAULT_SEARCH_LIMIT,
};
pub use router::{ContextRouter, MSG_LLM_FAILED, MSG_TECHNICAL_PROBLEM};
pub use settings::RouterSettings;
