//! Tunables for [`crate::ContextRouter`].

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RouterSettings {
    /// Recent turns replayed as conversation history.
    pub history_limit: usize,
    /// Documents requested from the similarity retriever.
    pub retrieval_top_k: usize,
    pub llm_timeout: Duration,
    pub search_timeout: Duration,
    pub retrieval_timeout: Duration,
    /// Append the current date to the web search query.
    pub annotate_search_with_date: bool,
    /// Write the question and answer back as long-term memory entries.
    pub record_long_memory: bool,
    /// Important memories added as known facts; 0 disables.
    pub long_memory_context_limit: usize,
    pub long_memory_min_importance: f64,
    /// Most recent memories added as known facts regardless of importance; 0 disables.
    pub long_memory_recent_limit: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            history_limit: 10,
            retrieval_top_k: 3,
            llm_timeout: Duration::from_secs(60),
            search_timeout: Duration::from_secs(15),
            retrieval_timeout: Duration::from_secs(30),
            annotate_search_with_date: true,
            record_long_memory: true,
            long_memory_context_limit: 5,
            long_memory_min_importance: 0.7,
            long_memory_recent_limit: 5,
        }
    }
}
