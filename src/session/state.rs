//! Exercise session state types

use super::catalog::{ExerciseScript, FALLBACK_SCRIPT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Length of a guided session in seconds
pub const DEFAULT_SESSION_SECONDS: u32 = 300;

/// Lifecycle status of the exercise player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    Paused,
    /// Finished naturally, waiting for the host to acknowledge
    Completed,
}

impl SessionStatus {
    /// Running or paused
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, SessionStatus::Running | SessionStatus::Paused)
    }
}

/// The two periodic timers a session drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Countdown, one second by default
    Tick,
    /// Instruction rotation, ten seconds by default
    Rotation,
}

/// Epochs of the currently armed timers. `None` means not armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArmedTimers {
    pub tick: Option<u64>,
    pub rotation: Option<u64>,
}

impl ArmedTimers {
    #[must_use]
    pub fn get(&self, kind: TimerKind) -> Option<u64> {
        match kind {
            TimerKind::Tick => self.tick,
            TimerKind::Rotation => self.rotation,
        }
    }

    pub fn set(&mut self, kind: TimerKind, epoch: Option<u64>) {
        match kind {
            TimerKind::Tick => self.tick = epoch,
            TimerKind::Rotation => self.rotation = epoch,
        }
    }
}

/// One guided mindfulness session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSession {
    pub exercise: Option<String>,
    /// Resolved once at start; the fallback while idle
    pub script: &'static ExerciseScript,
    pub status: SessionStatus,
    pub remaining_seconds: u32,
    pub step_index: usize,
    /// Instruction currently on screen
    pub instruction: Option<&'static str>,
    pub timers: ArmedTimers,
    /// Last epoch handed out; epochs only grow
    pub last_epoch: u64,
}

impl Default for ExerciseSession {
    fn default() -> Self {
        Self {
            exercise: None,
            script: &FALLBACK_SCRIPT,
            status: SessionStatus::Idle,
            remaining_seconds: 0,
            step_index: 0,
            instruction: None,
            timers: ArmedTimers::default(),
            last_epoch: 0,
        }
    }
}

/// How pausing treats the rotation timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseBehavior {
    /// Tick and rotation both stop while paused
    #[default]
    SuspendAll,
    /// Only the countdown stops; instructions keep rotating
    LegacyTickOnly,
}

/// Immutable session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub session_seconds: u32,
    pub tick_interval: Duration,
    pub rotation_interval: Duration,
    pub pause_behavior: PauseBehavior,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            session_seconds: DEFAULT_SESSION_SECONDS,
            tick_interval: Duration::from_secs(1),
            rotation_interval: Duration::from_secs(10),
            pause_behavior: PauseBehavior::SuspendAll,
        }
    }
}

/// Format seconds as a zero-padded `MM:SS` countdown
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
