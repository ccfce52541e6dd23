//! Two-tier keyword classifier.

use tracing::debug;

use crate::{Intent, KeywordTable};

/// Classifies messages against a [`KeywordTable`]. Cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    table: KeywordTable,
}

impl IntentClassifier {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Never fails; ambiguous or empty input is [`Intent::Default`].
    pub fn classify(&self, message: &str) -> Intent {
        let lowered = message.trim().to_lowercase();
        if lowered.is_empty() {
            return Intent::Default;
        }

        if self
            .table
            .date_time_phrases
            .iter()
            .any(|p| lowered.contains(p.as_str()))
        {
            debug!(intent = "date_time", "intent classified");
            return Intent::DateTime;
        }

        let tokens = tokenize(&lowered);
        // Padded so multi-word keywords only match on token boundaries.
        let joined = format!(" {} ", tokens.join(" "));
        let has = |word: &String| {
            if word.contains(' ') {
                joined.contains(&format!(" {} ", word))
            } else {
                tokens.iter().any(|t| t == word)
            }
        };

        let strong = self.table.realtime_keywords.iter().any(has)
            || tokens.iter().any(|t| self.is_recent_year(t));
        let combined = self.table.recency_words.iter().any(has)
            && self.table.domain_words.iter().any(has);

        if strong || combined {
            debug!(intent = "realtime", strong, combined, "intent classified");
            Intent::Realtime
        } else {
            Intent::Default
        }
    }

    fn is_recent_year(&self, token: &str) -> bool {
        token.len() == 4
            && token.bytes().all(|b| b.is_ascii_digit())
            && token
                .parse::<u32>()
                .map(|y| self.table.years().contains(&y))
                .unwrap_or(false)
    }
}

/// Splits on anything that is not alphanumeric. Apostrophes split too ("what's" -> "what", "s").
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("what's the ipl-score?"), vec!["what", "s", "the", "ipl", "score"]);
        assert!(tokenize("  ,,  ").is_empty());
    }

    #[test]
    fn test_recent_year_bounds() {
        let c = IntentClassifier::default();
        assert!(c.is_recent_year("2023"));
        assert!(c.is_recent_year("2030"));
        assert!(!c.is_recent_year("2022"));
        assert!(!c.is_recent_year("20250"));
    }
}
