//! Aggregate statistics over one user's long-term memories.
//!
//! Returned by LongMemoryStore::stats.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memories: i64,
    /// memory_type -> count
    pub memory_types: BTreeMap<String, i64>,
    /// Rounded to two decimals; 0.0 when the user has no memories.
    pub average_importance: f64,
    pub most_recent_memory: Option<DateTime<Utc>>,
}
