//! Context router: decides how a message is answered and assembles the prompt.
//!
//! Paths, in the order they can be visited for one request:
//!
//! - date/time: answered from the [`Clock`], nothing else is touched
//! - realtime: web search results + search prompt; any failure falls through to default
//! - default: similarity retrieval + known facts + history; an LLM failure yields a canned reply
//!
//! Collaborator failures are values (`anyhow::Result`), and the branching is an explicit
//! [`RouteState`] machine. Panics are caught at the top of [`ContextRouter::respond`].

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use chat_core::{ChatError, ChatResult, ContextItem, ResponsePath, Result};
use futures::FutureExt;
use intent::{Intent, IntentClassifier};
use llm_client::LlmClient;
use memory_retriever::SimilarityRetriever;
use prompt::{
    build_context_messages, build_search_messages, format_context_block, format_known_facts,
    format_search_results, history_messages, ChatMessage, Persona, NO_CONTEXT_AVAILABLE,
};
use serde_json::{Map, Value};
use storage::{ChatTurn, ChatTurnStore, LongMemoryRecord, LongMemoryStore, MemoryRole, MemoryType};
use tracing::{debug, error, info, instrument, warn};
use web_search::WebSearch;

use crate::clock::{Clock, DateTimeInfo, SystemClock};
use crate::settings::RouterSettings;

// --- User-facing fallback answers ---
pub const MSG_LLM_FAILED: &str =
    "Sorry, I couldn't come up with an answer right now. Please try again in a moment.";
pub const MSG_TECHNICAL_PROBLEM: &str =
    "Sorry, I ran into a technical problem while answering. Please try again!";

/// Where a request currently is in the fallback chain.
enum RouteState {
    Realtime,
    Default,
    Answered(ChatResult),
    LlmFailed,
}

/// Answers chat messages. Construct once and share; every collaborator is injected.
///
/// **External interactions:** ChatTurnStore (history, persistence), LlmClient, SimilarityRetriever,
/// optional WebSearch, optional LongMemoryStore (known facts, write-through).
pub struct ContextRouter {
    turns: Arc<dyn ChatTurnStore>,
    llm: Arc<dyn LlmClient>,
    retriever: Arc<dyn SimilarityRetriever>,
    search: Option<Arc<dyn WebSearch>>,
    long_memory: Option<Arc<dyn LongMemoryStore>>,
    clock: Arc<dyn Clock>,
    classifier: IntentClassifier,
    persona: Persona,
    settings: RouterSettings,
}

impl ContextRouter {
    // ---------- Construction ----------

    pub fn new(
        turns: Arc<dyn ChatTurnStore>,
        llm: Arc<dyn LlmClient>,
        retriever: Arc<dyn SimilarityRetriever>,
    ) -> Self {
        Self {
            turns,
            llm,
            retriever,
            search: None,
            long_memory: None,
            clock: Arc::new(SystemClock),
            classifier: IntentClassifier::default(),
            persona: Persona::default(),
            settings: RouterSettings::default(),
        }
    }

    /// Enables the realtime path. Without it realtime messages go straight to retrieval.
    pub fn with_search(mut self, search: Arc<dyn WebSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Enables known facts in the prompt and long-term memory write-through.
    pub fn with_long_memory(mut self, store: Arc<dyn LongMemoryStore>) -> Self {
        self.long_memory = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_settings(mut self, settings: RouterSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    // ---------- Entry point ----------

    /// Produces an answer for `message`.
    ///
    /// Only blank input is an error; upstream and storage failures degrade into an answer
    /// tagged with the path that produced it (or `error`).
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn respond(&self, user_id: &str, message: &str) -> Result<ChatResult> {
        if user_id.trim().is_empty() {
            return Err(ChatError::Validation("user_id must not be empty".to_string()));
        }
        if message.trim().is_empty() {
            return Err(ChatError::Validation("message must not be empty".to_string()));
        }

        match AssertUnwindSafe(self.route(user_id, message))
            .catch_unwind()
            .await
        {
            Ok(result) => {
                info!(path = %result.path, context_items = result.context.len(), "step: respond done");
                Ok(result)
            }
            Err(payload) => {
                error!(panic = %panic_message(payload.as_ref()), "respond panicked");
                Ok(ChatResult::error(MSG_TECHNICAL_PROBLEM))
            }
        }
    }

    /// `question` is stored verbatim; the trimmed text drives classification and prompts.
    async fn route(&self, user_id: &str, question: &str) -> ChatResult {
        let message = question.trim();
        let now = DateTimeInfo::from_datetime(&self.clock.now());
        let intent = self.classifier.classify(message);
        info!(intent = %intent, "step: intent classified");

        let mut state = match intent {
            Intent::DateTime => return ChatResult::new(now.answer(), Vec::new(), ResponsePath::SystemTime),
            Intent::Realtime => RouteState::Realtime,
            Intent::Default => RouteState::Default,
        };

        // Classification needs no history, so it is loaded only once the clock path is ruled out.
        let history = self.load_history(user_id).await;

        loop {
            state = match state {
                RouteState::Realtime => match self.answer_from_search(message, &history, &now).await {
                    Ok(result) => RouteState::Answered(result),
                    Err(e) => {
                        log_error_chain(&e, "Realtime path failed, falling back to retrieval");
                        RouteState::Default
                    }
                },
                RouteState::Default => match self.answer_from_context(user_id, message, &history).await {
                    Ok(result) => RouteState::Answered(result),
                    Err(e) => {
                        log_error_chain(&e, "LLM call failed on retrieval path");
                        RouteState::LlmFailed
                    }
                },
                RouteState::Answered(result) => {
                    self.persist_turn(user_id, question, &result.answer).await;
                    self.record_long_memory(user_id, message, &result).await;
                    return result;
                }
                RouteState::LlmFailed => {
                    self.persist_turn(user_id, question, MSG_LLM_FAILED).await;
                    return ChatResult::error(MSG_LLM_FAILED);
                }
            };
        }
    }

    // ---------- Paths ----------

    async fn answer_from_search(
        &self,
        message: &str,
        history: &[ChatMessage],
        now: &DateTimeInfo,
    ) -> anyhow::Result<ChatResult> {
        let search = self
            .search
            .as_ref()
            .ok_or_else(|| anyhow!("web search is not configured"))?;

        let query = if self.settings.annotate_search_with_date {
            format!("{} {}", message, now.date)
        } else {
            message.to_string()
        };
        let results = bounded("web search", self.settings.search_timeout, search.search(&query)).await?;
        if results.is_empty() {
            return Err(anyhow!("web search returned no results"));
        }
        debug!(result_count = results.len(), "step: search results received");

        let block = format_search_results(
            results
                .iter()
                .map(|r| (r.title.as_str(), r.url.as_str(), r.content.as_str())),
        );
        let messages = build_search_messages(
            &self.persona.search_system_prompt(&now.date),
            history.to_vec(),
            &block,
            &now.date,
            message,
        );
        let answer = self.complete(messages).await?;

        let context = results
            .into_iter()
            .map(|r| {
                ContextItem::new(r.content)
                    .with_metadata("title", r.title)
                    .with_metadata("url", r.url)
                    .with_metadata("score", r.score)
                    .with_metadata("source", "web_search")
            })
            .collect();
        Ok(ChatResult::new(answer, context, ResponsePath::RealtimeSearch))
    }

    async fn answer_from_context(
        &self,
        user_id: &str,
        message: &str,
        history: &[ChatMessage],
    ) -> anyhow::Result<ChatResult> {
        let retrieval = bounded(
            "retrieval",
            self.settings.retrieval_timeout,
            self.retriever.retrieve(message, self.settings.retrieval_top_k),
        )
        .await;

        let (block, context) = match retrieval {
            Ok(documents) => {
                debug!(document_count = documents.len(), "step: documents retrieved");
                let block = format_context_block(documents.iter().map(|d| d.content.as_str()));
                let context: Vec<ContextItem> = documents
                    .into_iter()
                    .map(|d| ContextItem {
                        content: d.content,
                        metadata: d.metadata,
                    })
                    .collect();
                (block, context)
            }
            Err(e) => {
                log_error_chain(&e, "Retrieval failed, answering without context");
                (NO_CONTEXT_AVAILABLE.to_string(), Vec::new())
            }
        };

        let known_facts = self.known_facts(user_id).await;
        let messages = build_context_messages(
            &self.persona.system_prompt(),
            known_facts,
            history.to_vec(),
            &block,
            message,
        );
        let answer = self.complete(messages).await?;
        Ok(ChatResult::new(answer, context, ResponsePath::Vectorstore))
    }

    // ---------- Collaborator calls ----------

    async fn complete(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        debug!(count = messages.len(), "submit_to_llm");
        let answer = bounded("llm", self.settings.llm_timeout, self.llm.complete(messages)).await?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(anyhow!("LLM returned an empty answer"));
        }
        Ok(answer.to_string())
    }

    /// Recent turns as alternating user/assistant messages, oldest first. Empty on failure.
    async fn load_history(&self, user_id: &str) -> Vec<ChatMessage> {
        let limit = self.settings.history_limit as i64;
        if limit == 0 {
            return Vec::new();
        }
        match self.turns.recent_turns(user_id, limit).await {
            Ok(mut turns) => {
                turns.reverse();
                debug!(turn_count = turns.len(), "step: history loaded");
                history_messages(turns.into_iter().map(|t| (t.question, t.answer)))
            }
            Err(e) => {
                warn!(error = %e, "Failed to load chat history");
                Vec::new()
            }
        }
    }

    /// Important long-term memories for the prompt; each one used is touched.
    /// Important entries first, then the most recent ones not already included.
    async fn known_facts(&self, user_id: &str) -> Option<String> {
        let store = self.long_memory.as_ref()?;
        let important_limit = self.settings.long_memory_context_limit as i64;
        let recent_limit = self.settings.long_memory_recent_limit as i64;

        let mut memories = Vec::new();
        if important_limit > 0 {
            match store
                .get_important(user_id, self.settings.long_memory_min_importance, important_limit)
                .await
            {
                Ok(important) => memories.extend(important),
                Err(e) => warn!(error = %e, "Failed to load important memories"),
            }
        }
        if recent_limit > 0 {
            match store.get_recent(user_id, recent_limit).await {
                Ok(recent) => {
                    for memory in recent {
                        if !memories.iter().any(|m| m.id == memory.id) {
                            memories.push(memory);
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Failed to load recent memories"),
            }
        }
        if memories.is_empty() {
            return None;
        }
        for memory in &memories {
            if let Err(e) = store.touch(&memory.id).await {
                warn!(memory_id = %memory.id, error = %e, "Failed to touch memory");
            }
        }
        format_known_facts(memories.iter().map(|m| m.content.as_str()))
    }

    // ---------- Persistence (best effort) ----------

    async fn persist_turn(&self, user_id: &str, question: &str, answer: &str) {
        let turn = ChatTurn::new(user_id, question, answer);
        match self.turns.save_turn(&turn).await {
            Ok(()) => debug!(turn_id = %turn.id, "step: turn saved"),
            Err(e) => error!(error = %e, "Failed to save chat turn"),
        }
    }

    async fn record_long_memory(&self, user_id: &str, question: &str, result: &ChatResult) {
        if !self.settings.record_long_memory {
            return;
        }
        let Some(store) = self.long_memory.as_ref() else {
            return;
        };

        let mut metadata = Map::new();
        metadata.insert("source".to_string(), Value::from("chat"));
        metadata.insert("path".to_string(), Value::from(result.path.as_str()));

        let entries = [
            LongMemoryRecord::new(user_id, MemoryRole::Human, question, MemoryType::Fact)
                .with_metadata(metadata.clone()),
            LongMemoryRecord::new(user_id, MemoryRole::Ai, result.answer.as_str(), MemoryType::Note)
                .with_metadata(metadata),
        ];
        for entry in &entries {
            if let Err(e) = store.create(entry).await {
                warn!(role = %entry.role, error = %e, "Failed to record long-term memory");
            }
        }
    }
}

/// Runs a collaborator call under a deadline; a timeout is an ordinary failure.
async fn bounded<T, F>(operation: &'static str, limit: Duration, call: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "call timed out");
            Err(anyhow!("{} timed out after {:?}", operation, limit))
        }
    }
}

/// Logs error and its cause chain. First item with `first_msg`, rest with "Caused by".
fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
    for (i, cause) in e.chain().enumerate() {
        if i == 0 {
            warn!(cause = %cause, "{}", first_msg);
        } else {
            warn!(cause = %cause, "Caused by");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
