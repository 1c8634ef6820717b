//! Mock wellness statistics shown on the dashboard
//!
//! Owned by the host and mutated from its event loop: once per completed
//! chat exchange and once per finished or stopped exercise.

use crate::runtime::RandomSource;
use serde::{Deserialize, Serialize};

/// Upper bound of the wellness score
pub const MAX_WELLNESS_SCORE: u8 = 100;

/// Default chance that an exchange reshuffles the mood
pub const DEFAULT_MOOD_CHANGE_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Optimistic,
    Calm,
    Focused,
    Content,
    Energized,
    Balanced,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Optimistic,
        Mood::Calm,
        Mood::Focused,
        Mood::Content,
        Mood::Energized,
        Mood::Balanced,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Optimistic => "Optimistic",
            Mood::Calm => "Calm",
            Mood::Focused => "Focused",
            Mood::Content => "Content",
            Mood::Energized => "Energized",
            Mood::Balanced => "Balanced",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood moved from one value to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodChange {
    pub from: Mood,
    pub to: Mood,
}

/// Outcome of recording one chat exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRecord {
    pub conversation_count: u32,
    pub mood_change: Option<MoodChange>,
}

/// Dashboard view of the counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub mood: Mood,
    pub conversation_count: u32,
    pub wellness_score: u8,
    pub insights_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellnessCounters {
    pub conversation_count: u32,
    pub mood: Mood,
    pub wellness_score: u8,
    pub insights_count: u32,
}

impl Default for WellnessCounters {
    /// The demo profile every fresh page load starts from
    fn default() -> Self {
        Self {
            conversation_count: 24,
            mood: Mood::Optimistic,
            wellness_score: 87,
            insights_count: 42,
        }
    }
}

impl WellnessCounters {
    /// Count a completed exchange and maybe reshuffle the mood.
    ///
    /// The mood is redrawn when the first draw lands in the top `probability`
    /// of `[0, 1)`. Drawing the current mood again is a silent no-op.
    pub fn record_exchange(
        &mut self,
        rng: &mut impl RandomSource,
        probability: f64,
    ) -> ExchangeRecord {
        self.conversation_count = self.conversation_count.saturating_add(1);

        let mood_change = if rng.next_unit() > 1.0 - probability {
            let drawn = Mood::ALL[rng.pick_index(Mood::ALL.len())];
            (drawn != self.mood).then(|| {
                let change = MoodChange {
                    from: self.mood,
                    to: drawn,
                };
                self.mood = drawn;
                change
            })
        } else {
            None
        };

        ExchangeRecord {
            conversation_count: self.conversation_count,
            mood_change,
        }
    }

    /// Add points, capped at [`MAX_WELLNESS_SCORE`]. Returns the new score
    /// only if it moved.
    pub fn award_points(&mut self, points: u8) -> Option<u8> {
        let score = self
            .wellness_score
            .saturating_add(points)
            .min(MAX_WELLNESS_SCORE);
        if score == self.wellness_score {
            return None;
        }
        tracing::debug!(from = self.wellness_score, to = score, "Wellness score updated");
        self.wellness_score = score;
        Some(score)
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats {
            mood: self.mood,
            conversation_count: self.conversation_count,
            wellness_score: self.wellness_score,
            insights_count: self.insights_count,
        }
    }
}
