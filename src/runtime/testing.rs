//! Mock implementations for testing
//!
//! These mocks let tests drive sessions without wall-clock time.

use super::traits::{RandomSource, Scheduler, SessionObserver, TimerHandle, TimerRequest};
use crate::notifications::Notice;
use crate::session::{SessionStatus, TimerFired, TimerKind};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

// ============================================================================
// Manual Scheduler
// ============================================================================

#[derive(Default)]
struct ManualTimers {
    next_handle: u64,
    active: HashMap<TimerHandle, TimerRequest>,
    cancelled: Vec<TimerHandle>,
}

/// Scheduler whose timers only fire when a test says so
///
/// Clones share state, so a test can keep a handle after handing the
/// scheduler to a runtime.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualTimers>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the fire of the active timer of `kind`, if one is armed.
    /// The caller delivers it to the runtime.
    #[must_use]
    pub fn fire(&self, kind: TimerKind) -> Option<TimerFired> {
        self.inner
            .lock()
            .unwrap()
            .active
            .values()
            .find(|request| request.kind == kind)
            .map(|request| TimerFired {
                kind,
                epoch: request.epoch,
            })
    }

    #[must_use]
    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.inner
            .lock()
            .unwrap()
            .active
            .values()
            .any(|request| request.kind == kind)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.lock().unwrap().active.len()
    }

    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.inner.lock().unwrap().cancelled.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, request: TimerRequest) -> TimerHandle {
        let mut timers = self.inner.lock().unwrap();
        timers.next_handle += 1;
        let handle = TimerHandle(timers.next_handle);
        timers.active.insert(handle, request);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut timers = self.inner.lock().unwrap();
        if timers.active.remove(&handle).is_some() {
            timers.cancelled.push(handle);
        }
    }
}

// ============================================================================
// Scripted Randomness
// ============================================================================

/// Random source that replays a fixed sequence, then returns 0.0
pub struct SequenceRandom {
    values: VecDeque<f64>,
}

impl SequenceRandom {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(0.0)
    }
}

// ============================================================================
// Recording Observer
// ============================================================================

/// Observer that records every callback
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub ticks: Vec<u32>,
    pub instructions: Vec<String>,
    pub statuses: Vec<SessionStatus>,
    pub points: Vec<u8>,
    pub notices: Vec<Notice>,
    pub player_title: Option<String>,
    pub player_open: bool,
    pub scroll_locked: Option<bool>,
}

impl SessionObserver for RecordingObserver {
    fn on_tick(&mut self, remaining_seconds: u32) {
        self.ticks.push(remaining_seconds);
    }

    fn on_instruction_change(&mut self, text: &str) {
        self.instructions.push(text.to_string());
    }

    fn on_status_change(&mut self, status: SessionStatus) {
        self.statuses.push(status);
    }

    fn on_award_points(&mut self, points: u8) {
        self.points.push(points);
    }

    fn on_player_opened(&mut self, title: &str, _description: &str) {
        self.player_title = Some(title.to_string());
        self.player_open = true;
    }

    fn on_player_closed(&mut self) {
        self.player_open = false;
    }

    fn on_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = Some(locked);
    }

    fn on_notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
