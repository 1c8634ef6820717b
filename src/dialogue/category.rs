//! Keyword classification of user messages

use serde::{Deserialize, Serialize};

/// Topic a user message is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Greetings,
    Anxious,
    Stressed,
    Sad,
    Motivation,
    Sleep,
    Default,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Greetings,
        Category::Anxious,
        Category::Stressed,
        Category::Sad,
        Category::Motivation,
        Category::Sleep,
        Category::Default,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Greetings => "greetings",
            Category::Anxious => "anxious",
            Category::Stressed => "stressed",
            Category::Sad => "sad",
            Category::Motivation => "motivation",
            Category::Sleep => "sleep",
            Category::Default => "default",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Keyword table ───────────────────────────────────────────────────────

/// Scanned top to bottom; the first row with a matching keyword wins.
///
/// "tired" appears under both motivation and sleep. Motivation is checked
/// first, so sleep never sees it.
const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (Category::Greetings, &["hello", "hi", "hey"]),
    (Category::Anxious, &["anxious", "anxiety", "nervous"]),
    (Category::Stressed, &["stress", "overwhelm", "pressure"]),
    (Category::Sad, &["sad", "depress", "down"]),
    (Category::Motivation, &["motivat", "energy", "tired"]),
    (Category::Sleep, &["sleep", "tired", "exhaust"]),
];

/// Classify a message by plain substring match on its lower-cased text.
///
/// Substrings are not word-bounded: "this" contains "hi" and counts as a
/// greeting. Never fails; unmatched text is [`Category::Default`].
#[must_use]
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(*keyword)))
        .map_or(Category::Default, |(category, _)| *category)
}
