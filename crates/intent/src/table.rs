//! Phrase and keyword table driving the classifier.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::Path;

/// Phrase/keyword sets. All entries are compared lowercased.
///
/// A JSON override may supply any subset of fields; missing fields keep the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    /// Substring triggers for the date/time path.
    pub date_time_phrases: Vec<String>,
    /// Standalone realtime triggers (word tokens; multi-word entries match joined tokens).
    pub realtime_keywords: Vec<String>,
    /// Recency words for the second-tier check.
    pub recency_words: Vec<String>,
    /// Domain words that only count together with a recency word.
    pub domain_words: Vec<String>,
    /// Inclusive year range counted as realtime, e.g. `[2023, 2030]`.
    pub recent_years: (u32, u32),
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            date_time_phrases: owned(&[
                "aaj ki date",
                "aaj ki tarikh",
                "today date",
                "today's date",
                "todays date",
                "aaj ka din",
                "aaj kaun sa din",
                "current date",
                "current time",
                "kya tarikh",
                "aaj kya date",
                "date kya hai",
                "time kya hai",
                "kitne baje",
                "aaj ka time",
                "what's the date",
                "what is the date",
                "what day is it",
                "what's the time",
                "what is the time",
                "what time is it",
            ]),
            realtime_keywords: owned(&[
                // time-sensitive
                "latest", "today", "live", "trending", "breaking", "news", "headline",
                "headlines", "aaj", "abhi", "abhi ka", "kal ka",
                // sports
                "score", "ipl", "tournament",
                // finance
                "sensex", "nifty", "bitcoin", "stock", "stocks", "bazar", "market",
                // weather
                "weather", "temperature", "forecast",
            ]),
            recency_words: owned(&["today", "now", "current", "latest", "aaj", "abhi"]),
            domain_words: owned(&[
                "price", "rate", "value", "gold", "silver", "usd", "crypto", "share",
                "match", "winner", "game", "result",
                "update", "updates",
                "rain", "humidity", "climate",
            ]),
            recent_years: (2023, 2030),
        }
    }
}

impl KeywordTable {
    /// Loads an override table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read intent table {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Invalid intent table {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let table: KeywordTable = serde_json::from_str(raw)?;
        Ok(table.normalized())
    }

    pub fn years(&self) -> RangeInclusive<u32> {
        self.recent_years.0..=self.recent_years.1
    }

    fn normalized(mut self) -> Self {
        for list in [
            &mut self.date_time_phrases,
            &mut self.realtime_keywords,
            &mut self.recency_words,
            &mut self.domain_words,
        ] {
            list.iter_mut().for_each(|w| *w = w.trim().to_lowercase());
            list.retain(|w| !w.is_empty());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let table = KeywordTable::from_json_str(r#"{"realtime_keywords": ["  Cricket "]}"#).unwrap();
        assert_eq!(table.realtime_keywords, vec!["cricket".to_string()]);
        assert!(table.date_time_phrases.contains(&"aaj ki date".to_string()));
        assert_eq!(table.years(), 2023..=2030);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"recent_years": [2020, 2021]}}"#).unwrap();
        let table = KeywordTable::from_json_file(file.path()).unwrap();
        assert!(table.years().contains(&2020));
        assert!(!table.years().contains(&2025));
    }

    #[test]
    fn test_from_json_file_missing() {
        assert!(KeywordTable::from_json_file("/nonexistent/intent.json").is_err());
    }
}
