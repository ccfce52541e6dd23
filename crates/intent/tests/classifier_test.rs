//! Behavioural tests for [`intent::IntentClassifier`] with the built-in table.

use intent::{Intent, IntentClassifier, KeywordTable};

fn classify(message: &str) -> Intent {
    IntentClassifier::default().classify(message)
}

/// **Test: Date/time phrases in English and Hinglish pick the DateTime path.**
#[test]
fn test_date_time_phrases() {
    for message in [
        "Aaj ki date kya hai?",
        "what's the date",
        "What time is it right now",
        "bhai time kya hai",
        "tell me today's date please",
    ] {
        assert_eq!(classify(message), Intent::DateTime, "{}", message);
    }
}

/// **Test: DateTime takes precedence even when realtime keywords are present.**
#[test]
fn test_date_time_precedence() {
    assert_eq!(classify("current date and latest news"), Intent::DateTime);
}

/// **Test: Strong realtime keywords trigger on their own.**
#[test]
fn test_strong_realtime_keywords() {
    for message in [
        "what's the score of the match today",
        "sensex kitna hai",
        "weather in Delhi",
        "breaking headlines",
        "abhi ka haal batao",
        "who won the election in 2024",
    ] {
        assert_eq!(classify(message), Intent::Realtime, "{}", message);
    }
}

/// **Test: A domain word alone stays Default; with a recency word it becomes Realtime.**
#[test]
fn test_second_tier_combination() {
    assert_eq!(classify("what is the price of gold"), Intent::Default);
    assert_eq!(classify("gold price now"), Intent::Realtime);
    assert_eq!(classify("current usd rate"), Intent::Realtime);
    assert_eq!(classify("who was the match winner"), Intent::Default);
}

/// **Test: Keywords match whole words only ("know" does not contain the word "now").**
#[test]
fn test_word_boundaries() {
    assert_eq!(classify("do you know the gold price"), Intent::Default);
    assert_eq!(classify("scoreboard design ideas"), Intent::Default);
    assert_eq!(classify("the year 1999 was great"), Intent::Default);
}

/// **Test: Empty, whitespace and unrelated input default.**
#[test]
fn test_default_path() {
    assert_eq!(classify(""), Intent::Default);
    assert_eq!(classify("   \n"), Intent::Default);
    assert_eq!(classify("tell me a joke about cats"), Intent::Default);
}

/// **Test: A custom table replaces the trigger sets.**
#[test]
fn test_custom_table() {
    let table = KeywordTable::from_json_str(
        r#"{"date_time_phrases": ["tarikh"], "realtime_keywords": ["cricket"],
            "recency_words": [], "domain_words": []}"#,
    )
    .unwrap();
    let classifier = IntentClassifier::new(table);
    assert_eq!(classifier.classify("tarikh batao"), Intent::DateTime);
    assert_eq!(classifier.classify("Cricket updates"), Intent::Realtime);
    assert_eq!(classifier.classify("latest news"), Intent::Default);
}
