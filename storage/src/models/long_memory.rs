//! Long-term memory entries: typed, importance-scored notes about a user.
//!
//! Maps to the `long_memories` table and is used by LongMemoryRepository.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StorageError;

pub const DEFAULT_IMPORTANCE: f64 = 0.5;

/// Clamps an importance score into `[0, 1]`. NaN becomes [`DEFAULT_IMPORTANCE`].
pub fn clamp_importance(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_IMPORTANCE
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryRole {
    #[default]
    System,
    Human,
    Ai,
}

impl MemoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryRole::System => "system",
            MemoryRole::Human => "human",
            MemoryRole::Ai => "ai",
        }
    }
}

impl FromStr for MemoryRole {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(MemoryRole::System),
            "human" => Ok(MemoryRole::Human),
            "ai" => Ok(MemoryRole::Ai),
            other => Err(StorageError::Validation(format!(
                "role must be one of system, human, ai (got '{}')",
                other
            ))),
        }
    }
}

impl fmt::Display for MemoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    #[default]
    Summary,
    Fact,
    Reflection,
    Note,
}

impl MemoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryType::Summary => "summary",
            MemoryType::Fact => "fact",
            MemoryType::Reflection => "reflection",
            MemoryType::Note => "note",
        }
    }
}

impl FromStr for MemoryType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(MemoryType::Summary),
            "fact" => Ok(MemoryType::Fact),
            "reflection" => Ok(MemoryType::Reflection),
            "note" => Ok(MemoryType::Note),
            other => Err(StorageError::Validation(format!(
                "memory_type must be one of summary, fact, reflection, note (got '{}')",
                other
            ))),
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongMemoryRecord {
    pub id: String,
    pub user_id: String,
    pub role: MemoryRole,
    pub content: String,
    pub memory_type: MemoryType,
    pub importance_score: f64,
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl LongMemoryRecord {
    /// Creates a new entry with a generated UUID; `created_at` and `last_used_at` are now.
    pub fn new(
        user_id: impl Into<String>,
        role: MemoryRole,
        content: impl Into<String>,
        memory_type: MemoryType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            role,
            content: content.into(),
            memory_type,
            importance_score: DEFAULT_IMPORTANCE,
            metadata: Map::new(),
            created_at: now,
            last_used_at: now,
        }
    }

    pub fn with_importance(mut self, importance_score: f64) -> Self {
        self.importance_score = clamp_importance(importance_score);
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.last_used_at = created_at;
        self
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongMemoryUpdate {
    pub content: Option<String>,
    pub memory_type: Option<MemoryType>,
    pub importance_score: Option<f64>,
    pub metadata: Option<Map<String, Value>>,
}

impl LongMemoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.memory_type.is_none()
            && self.importance_score.is_none()
            && self.metadata.is_none()
    }
}
