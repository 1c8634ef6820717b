//! Built-in guided exercises
//!
//! Each entry pairs an opening prompt with the instructions the player
//! rotates through while the session runs. Every entry has at least one step.

/// A guided exercise script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseScript {
    pub name: &'static str,
    pub initial_prompt: &'static str,
    pub steps: &'static [&'static str],
}

/// Script used for names the catalog does not know
pub const FALLBACK_SCRIPT: ExerciseScript = ExerciseScript {
    name: "",
    initial_prompt: "Find a comfortable position and begin the exercise.",
    steps: &["Breathe deeply and focus on the present moment."],
};

const SCRIPTS: &[ExerciseScript] = &[
    ExerciseScript {
        name: "4-7-8 Breathing",
        initial_prompt: "Find a comfortable seated position. Close your eyes if that feels comfortable.",
        steps: &[
            "Inhale quietly through your nose for 4 seconds...",
            "Hold your breath for 7 seconds...",
            "Exhale completely through your mouth for 8 seconds...",
            "Repeat this cycle. Focus on the rhythm of your breath.",
            "Notice how your body feels with each breath.",
            "Allow any tension to release with each exhale.",
        ],
    },
    ExerciseScript {
        name: "Body Scan Meditation",
        initial_prompt: "Lie down or sit comfortably. Close your eyes.",
        steps: &[
            "Bring awareness to your feet... Notice any sensations.",
            "Move your attention to your ankles and calves...",
            "Now focus on your knees and thighs...",
            "Bring awareness to your hips and pelvis...",
            "Notice your abdomen and lower back...",
            "Focus on your chest and upper back...",
            "Bring attention to your shoulders and arms...",
            "Notice your hands and fingers...",
            "Focus on your neck and throat...",
            "Bring awareness to your face and head...",
            "Now feel your entire body as a whole...",
        ],
    },
    ExerciseScript {
        name: "Peaceful Beach Visualization",
        initial_prompt: "Close your eyes and imagine yourself on a beautiful beach.",
        steps: &[
            "See the clear blue sky above you...",
            "Notice the gentle waves rolling onto the shore...",
            "Feel the warm sand beneath your feet...",
            "Hear the seagulls calling in the distance...",
            "Smell the fresh ocean air...",
            "Feel the gentle breeze on your skin...",
            "Watch the sunlight sparkling on the water...",
            "Notice how peaceful and relaxed you feel...",
        ],
    },
    ExerciseScript {
        name: "Box Breathing",
        initial_prompt: "Sit comfortably with your back straight.",
        steps: &[
            "Inhale through your nose for 4 seconds...",
            "Hold your breath for 4 seconds...",
            "Exhale slowly for 4 seconds...",
            "Hold empty for 4 seconds, then repeat...",
            "Focus on creating equal lengths for each phase.",
            "Notice how this rhythm calms your nervous system.",
        ],
    },
    ExerciseScript {
        name: "5-4-3-2-1 Grounding",
        initial_prompt: "Take a moment to notice your surroundings.",
        steps: &[
            "Name 5 things you can see around you...",
            "Notice 4 things you can feel (textures, temperature)...",
            "Identify 3 things you can hear...",
            "Notice 2 things you can smell...",
            "Identify 1 thing you can taste...",
            "Take a deep breath. Notice how you feel now.",
        ],
    },
    ExerciseScript {
        name: "Progressive Muscle Relaxation",
        initial_prompt: "Get comfortable. We'll tense and relax each muscle group.",
        steps: &[
            "Tense your feet for 5 seconds... then relax.",
            "Tense your calves for 5 seconds... then relax.",
            "Tense your thighs for 5 seconds... then relax.",
            "Tense your glutes for 5 seconds... then relax.",
            "Tense your abdomen for 5 seconds... then relax.",
            "Tense your chest for 5 seconds... then relax.",
            "Tense your back for 5 seconds... then relax.",
            "Tense your shoulders for 5 seconds... then relax.",
            "Tense your arms for 5 seconds... then relax.",
            "Tense your hands for 5 seconds... then relax.",
            "Tense your neck for 5 seconds... then relax.",
            "Tense your face for 5 seconds... then relax.",
        ],
    },
];

/// Look up a script by exact name, falling back to [`FALLBACK_SCRIPT`]
#[must_use]
pub fn lookup(name: &str) -> &'static ExerciseScript {
    SCRIPTS
        .iter()
        .find(|script| script.name == name)
        .unwrap_or(&FALLBACK_SCRIPT)
}

/// Names of all built-in exercises, in menu order
pub fn exercise_names() -> impl Iterator<Item = &'static str> {
    SCRIPTS.iter().map(|script| script.name)
}
