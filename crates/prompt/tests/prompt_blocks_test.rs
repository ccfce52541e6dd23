//! Unit tests for prompt blocks and message builders.
//!
//! External interactions: none (pure function tests).

use prompt::{
    build_context_messages, build_search_messages, format_context_block, format_known_facts,
    format_search_results, history_messages, ChatMessage, MessageRole, Persona,
    NO_RELEVANT_CONTEXT, SECTION_KNOWN_FACTS,
};

/// **Test: History pairs become alternating user / assistant messages in the given order.**
#[test]
fn history_alternates_roles() {
    let messages = history_messages(vec![("hi", "hello!"), ("how are you?", "great")]);
    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant
        ]
    );
    assert_eq!(messages[0].content, "hi");
    assert_eq!(messages[3].content, "great");
}

/// **Test: Empty documents produce the no-context sentinel; others are joined by a blank line.**
#[test]
fn context_block_joins_or_falls_back() {
    assert_eq!(format_context_block(Vec::<String>::new()), NO_RELEVANT_CONTEXT);
    assert_eq!(format_context_block(vec!["  ", ""]), NO_RELEVANT_CONTEXT);
    assert_eq!(format_context_block(vec!["a", "b"]), "a\n\nb");
}

/// **Test: Search results are numbered and carry title, url and snippet.**
#[test]
fn search_results_are_numbered() {
    let block = format_search_results(vec![
        ("Match report", "https://news.example/1", "Team A won by 3 runs."),
        ("Scorecard", "https://news.example/2", "Full scorecard."),
    ]);
    assert!(block.starts_with("[1] Match report\nURL: https://news.example/1\nTeam A won"));
    assert!(block.contains("[2] Scorecard"));
}

/// **Test: Known facts are None when empty and a bullet list otherwise.**
#[test]
fn known_facts_block() {
    assert!(format_known_facts(Vec::<&str>::new()).is_none());
    let facts = format_known_facts(vec!["Lives in Pune", "Vegetarian"]).unwrap();
    assert!(facts.starts_with(SECTION_KNOWN_FACTS));
    assert!(facts.contains("\n- Lives in Pune\n- Vegetarian"));
}

/// **Test: Context messages are ordered system → facts → history → question.**
#[test]
fn context_messages_order() {
    let history = history_messages(vec![("q1", "a1")]);
    let messages = build_context_messages(
        "SYS",
        Some("FACTS".to_string()),
        history,
        "ctx",
        "what now?",
    );
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0], ChatMessage::system("SYS"));
    assert_eq!(messages[1], ChatMessage::system("FACTS"));
    assert_eq!(messages[2], ChatMessage::user("q1"));
    assert_eq!(messages[4].role, MessageRole::User);
    assert!(messages[4].content.contains("ctx"));
    assert!(messages[4].content.ends_with("Question: what now?"));
}

/// **Test: Search messages pin the current date next to the results.**
#[test]
fn search_messages_include_date() {
    let persona = Persona::new("Dost", "Acme");
    let system = persona.search_system_prompt("17 October 2026");
    let messages = build_search_messages(&system, Vec::new(), "[1] x", "17 October 2026", "gold rate?");
    assert_eq!(messages.len(), 2);
    assert!(messages[0].content.contains("Today's date is 17 October 2026"));
    assert!(messages[0].content.contains("Dost"));
    assert!(messages[1].content.starts_with("Current date: 17 October 2026"));
    assert!(messages[1].content.ends_with("Question: gold rate?"));
}

/// **Test: The persona prompt names the bot and its creator.**
#[test]
fn persona_prompt_names() {
    let prompt = Persona::new("Dost", "Acme Labs").system_prompt();
    assert!(prompt.starts_with("You are Dost"));
    assert!(prompt.contains("created by Acme Labs"));
}
