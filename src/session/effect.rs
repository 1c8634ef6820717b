//! Effects produced by session transitions

use super::state::{SessionStatus, TimerKind};
use crate::notifications::{Notice, NotificationKind};
use std::time::Duration;

/// Points for ending a session early
pub const STOP_POINTS: u8 = 2;
/// Points for sitting through the whole session
pub const FINISH_POINTS: u8 = 5;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Schedule a periodic timer
    ArmTimer {
        kind: TimerKind,
        every: Duration,
        epoch: u64,
    },

    /// Cancel a periodic timer; must complete before the transition returns
    CancelTimer { kind: TimerKind },

    /// Show the exercise player
    OpenPlayer { title: String, description: String },

    /// Hide the exercise player
    ClosePlayer,

    /// Replace the displayed instruction
    ShowInstruction { text: &'static str },

    /// Update the countdown display
    Countdown { remaining_seconds: u32 },

    /// Session status changed
    StatusChanged { status: SessionStatus },

    /// Add to the wellness score
    AwardPoints { points: u8 },

    /// Suspend (`true`) or restore (`false`) background page scrolling
    ScrollLock { locked: bool },

    /// Post a notification
    Notify(Notice),
}

impl Effect {
    #[must_use]
    pub fn arm(kind: TimerKind, every: Duration, epoch: u64) -> Self {
        Effect::ArmTimer { kind, every, epoch }
    }

    #[must_use]
    pub fn cancel(kind: TimerKind) -> Self {
        Effect::CancelTimer { kind }
    }

    #[must_use]
    pub fn status(status: SessionStatus) -> Self {
        Effect::StatusChanged { status }
    }

    #[must_use]
    pub fn notify(kind: NotificationKind, title: &str, message: impl Into<String>) -> Self {
        Effect::Notify(Notice::new(kind, title, message))
    }
}
