//! Events that drive an exercise session

use super::state::TimerKind;

/// Events that trigger session transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    Start { exercise: String },
    Pause,
    Resume,
    Stop,
    /// Host has shown the completion and wants the player reset
    Acknowledge,

    // Scheduler events
    TimerFired(TimerFired),
}

/// A periodic timer went off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    /// Epoch the timer was armed with
    pub epoch: u64,
}

impl Event {
    #[must_use]
    pub fn start(exercise: impl Into<String>) -> Self {
        Event::Start {
            exercise: exercise.into(),
        }
    }

    #[must_use]
    pub fn tick(epoch: u64) -> Self {
        Event::TimerFired(TimerFired {
            kind: TimerKind::Tick,
            epoch,
        })
    }

    #[must_use]
    pub fn rotate(epoch: u64) -> Self {
        Event::TimerFired(TimerFired {
            kind: TimerKind::Rotation,
            epoch,
        })
    }
}
