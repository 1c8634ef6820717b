//! Runtime for executing exercise sessions
//!
//! The session state machine is pure; this module owns the live session,
//! talks to the scheduler and forwards presentation effects to the host.

mod executor;
mod scheduler;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;
pub use scheduler::TokioScheduler;
pub use traits::*;

use crate::session::{format_countdown, ExerciseSession, SessionStatus};
use serde::Serialize;

/// What the host needs to render after each session operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub exercise: Option<String>,
    pub instruction: Option<String>,
    pub remaining_seconds: u32,
    /// `MM:SS`
    pub countdown: String,
    pub step_index: usize,
}

impl SessionSnapshot {
    #[must_use]
    pub fn of(session: &ExerciseSession) -> Self {
        Self {
            status: session.status,
            exercise: session.exercise.clone(),
            instruction: session.instruction.map(str::to_string),
            remaining_seconds: session.remaining_seconds,
            countdown: format_countdown(session.remaining_seconds),
            step_index: session.step_index,
        }
    }
}
