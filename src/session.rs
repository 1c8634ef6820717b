//! Guided exercise session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

pub mod catalog;
mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, FINISH_POINTS, STOP_POINTS};
pub use event::{Event, TimerFired};
pub use state::{
    format_countdown, ExerciseSession, PauseBehavior, SessionContext, SessionStatus, TimerKind,
    DEFAULT_SESSION_SECONDS,
};
pub use transition::{transition, TransitionResult};
