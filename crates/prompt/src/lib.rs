//! # Prompt
//!
//! Builds the role-tagged message lists sent to the language model.
//!
//! ## Blocks
//!
//! - **History**: prior turns as alternating user / assistant messages, oldest first
//! - **Context**: retrieved document contents joined by a blank line, or a sentinel when there is none
//! - **Search results**: numbered title / url / snippet entries
//! - **Known facts**: important long-term memories about the user
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to chat-completion APIs (OpenAI or compatible).

mod persona;

pub use persona::Persona;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Context block when retrieval succeeded but found nothing.
pub const NO_RELEVANT_CONTEXT: &str = "No relevant context found.";

/// Context block when retrieval failed or timed out.
pub const NO_CONTEXT_AVAILABLE: &str = "No context available.";

pub const SECTION_CONTEXT: &str = "Context:";
pub const SECTION_SEARCH_RESULTS: &str = "Search results:";
pub const SECTION_KNOWN_FACTS: &str = "Things you remember about this user:";

/// Converts (question, answer) pairs, oldest first, into alternating user / assistant messages.
pub fn history_messages<I, Q, A>(turns: I) -> Vec<ChatMessage>
where
    I: IntoIterator<Item = (Q, A)>,
    Q: AsRef<str>,
    A: AsRef<str>,
{
    turns
        .into_iter()
        .flat_map(|(q, a)| {
            [
                ChatMessage::user(q.as_ref()),
                ChatMessage::assistant(a.as_ref()),
            ]
        })
        .collect()
}

/// Joins document contents with a blank line; [`NO_RELEVANT_CONTEXT`] when there are none.
pub fn format_context_block<I, S>(documents: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = documents
        .into_iter()
        .map(|d| d.as_ref().trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    if parts.is_empty() {
        NO_RELEVANT_CONTEXT.to_string()
    } else {
        parts.join("\n\n")
    }
}

/// Formats `(title, url, snippet)` triples as a numbered list.
pub fn format_search_results<I, T, U, C>(results: I) -> String
where
    I: IntoIterator<Item = (T, U, C)>,
    T: AsRef<str>,
    U: AsRef<str>,
    C: AsRef<str>,
{
    let mut out = String::new();
    for (i, (title, url, content)) in results.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "[{}] {}\nURL: {}\n{}\n",
            i + 1,
            title.as_ref().trim(),
            url.as_ref().trim(),
            content.as_ref().trim()
        ));
    }
    out
}

/// Bullet list of remembered facts, or `None` when there is nothing to add.
pub fn format_known_facts<I, S>(facts: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = facts
        .into_iter()
        .map(|f| f.as_ref().trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }
    let mut out = String::from(SECTION_KNOWN_FACTS);
    for line in lines {
        out.push_str("\n- ");
        out.push_str(&line);
    }
    Some(out)
}

/// Messages for an answer grounded on retrieved context.
///
/// Order: system → optional known-facts system message → history → user(context + question).
pub fn build_context_messages(
    system_prompt: &str,
    known_facts: Option<String>,
    history: Vec<ChatMessage>,
    context_block: &str,
    question: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 3);
    messages.push(ChatMessage::system(system_prompt));
    if let Some(facts) = known_facts {
        messages.push(ChatMessage::system(facts));
    }
    messages.extend(history);
    messages.push(ChatMessage::user(format!(
        "{}\n{}\n\nQuestion: {}",
        SECTION_CONTEXT, context_block, question
    )));
    messages
}

/// Messages for an answer grounded on live search results.
///
/// Order: search system prompt → history → user(current date + results + question).
pub fn build_search_messages(
    search_system_prompt: &str,
    history: Vec<ChatMessage>,
    results_block: &str,
    current_date: &str,
    question: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(search_system_prompt));
    messages.extend(history);
    messages.push(ChatMessage::user(format!(
        "Current date: {}\n\n{}\n{}\nQuestion: {}",
        current_date, SECTION_SEARCH_RESULTS, results_block, question
    )));
    messages
}
