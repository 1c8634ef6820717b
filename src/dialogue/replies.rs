//! Canned reply pools

use super::Category;
use crate::runtime::RandomSource;

const GREETINGS: &[&str] = &[
    "Hello! I'm here to listen. How has your day been so far?",
    "Hi there! I'm glad you're here. What's on your mind today?",
    "Welcome! I'm ready to support you. How are you feeling?",
];

const ANXIOUS: &[&str] = &[
    "It sounds like you're feeling anxious. Remember to take deep breaths - try the 4-7-8 breathing technique: inhale for 4, hold for 7, exhale for 8.",
    "Anxiety can feel overwhelming. Would you like to try a quick grounding exercise? Focus on 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste.",
    "I hear that you're feeling anxious. This is completely normal. Let's work through this together - what specifically is causing these feelings?",
];

const STRESSED: &[&str] = &[
    "Stress can really take a toll. Let's break down what's overwhelming you into smaller, manageable pieces.",
    "When stress feels heavy, remember to prioritize self-care. Even 5 minutes of mindful breathing can make a difference.",
    "I understand you're feeling stressed. Would it help to talk through what's specifically causing this stress?",
];

const SAD: &[&str] = &[
    "I'm sorry to hear you're feeling down. Remember that emotions are temporary, and it's okay to not be okay.",
    "Would you like to try a gratitude exercise? Sometimes focusing on small positive things can help shift perspective.",
    "Your feelings are valid. Is there something specific that's contributing to these feelings that you'd like to discuss?",
];

const MOTIVATION: &[&str] = &[
    "Sometimes starting is the hardest part. Try committing to just 5 minutes of activity - you might find momentum builds from there.",
    "What's one small step you could take right now toward your goal? Even tiny progress is still progress.",
    "Remember why this is important to you. Visualize how you'll feel after you've accomplished it.",
];

const SLEEP: &[&str] = &[
    "Sleep issues are common. Have you tried establishing a consistent bedtime routine? Avoiding screens an hour before bed can really help.",
    "A body scan meditation before bed might help you relax. Would you like me to guide you through one?",
    "Sleep patterns can affect our mental health. What specifically about your sleep would you like to improve?",
];

const DEFAULT: &[&str] = &[
    "Thank you for sharing that with me. Can you tell me more about how that makes you feel?",
    "I appreciate you opening up about this. What would be most helpful for you right now?",
    "I'm here to listen and support you. Is there a specific aspect you'd like to explore further?",
];

/// Fixed, non-empty reply pool for a category
#[must_use]
pub fn reply_pool(category: Category) -> &'static [&'static str] {
    match category {
        Category::Greetings => GREETINGS,
        Category::Anxious => ANXIOUS,
        Category::Stressed => STRESSED,
        Category::Sad => SAD,
        Category::Motivation => MOTIVATION,
        Category::Sleep => SLEEP,
        Category::Default => DEFAULT,
    }
}

/// Pick a reply uniformly at random from the category's pool.
///
/// Stateless; the same reply may come up twice in a row.
pub fn respond(category: Category, rng: &mut impl RandomSource) -> &'static str {
    let pool = reply_pool(category);
    pool[rng.pick_index(pool.len())]
}
