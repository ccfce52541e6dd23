use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which branch produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePath {
    SystemTime,
    RealtimeSearch,
    Vectorstore,
    Error,
}

impl ResponsePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponsePath::SystemTime => "system_time",
            ResponsePath::RealtimeSearch => "realtime_search",
            ResponsePath::Vectorstore => "vectorstore",
            ResponsePath::Error => "error",
        }
    }
}

impl fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-agnostic piece of context that grounded an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextItem {
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ContextItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    pub answer: String,
    pub context: Vec<ContextItem>,
    pub path: ResponsePath,
}

impl ChatResult {
    pub fn new(answer: impl Into<String>, context: Vec<ContextItem>, path: ResponsePath) -> Self {
        Self {
            answer: answer.into(),
            context,
            path,
        }
    }

    /// Apologetic answer with no context, tagged `error`.
    pub fn error(answer: impl Into<String>) -> Self {
        Self::new(answer, Vec::new(), ResponsePath::Error)
    }
}
