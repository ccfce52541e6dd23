//! Intent classification: picks the answer path for an incoming message.
//!
//! [`IntentClassifier::classify`] is a pure function over a [`KeywordTable`];
//! date/time phrases win over realtime keywords, anything else is [`Intent::Default`].

mod classifier;
mod table;

pub use classifier::IntentClassifier;
pub use table::KeywordTable;

use std::fmt;

/// Answer path chosen for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Answer from the system clock.
    DateTime,
    /// Consult live web search first.
    Realtime,
    /// Similarity retrieval over stored documents.
    Default,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::DateTime => "date_time",
            Intent::Realtime => "realtime",
            Intent::Default => "default",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
