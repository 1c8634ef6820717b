//! Session runtime executor

use super::traits::{Scheduler, SessionObserver, TimerHandle, TimerRequest};
use super::SessionSnapshot;
use crate::session::{
    transition, Effect, Event, ExerciseSession, SessionContext, SessionStatus, TimerFired,
    TimerKind,
};
use std::collections::HashMap;

/// Owns the one exercise session and carries out its effects
///
/// Every operation runs to completion before returning: timers requested by
/// a transition are scheduled, and timers it cancels are cancelled, before
/// the caller gets the snapshot back.
pub struct SessionRuntime<S: Scheduler> {
    context: SessionContext,
    state: ExerciseSession,
    scheduler: S,
    handles: HashMap<TimerKind, TimerHandle>,
}

impl<S: Scheduler> SessionRuntime<S> {
    #[must_use]
    pub fn new(context: SessionContext, scheduler: S) -> Self {
        Self {
            context,
            state: ExerciseSession::default(),
            scheduler,
            handles: HashMap::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ExerciseSession {
        &self.state
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::of(&self.state)
    }

    pub fn start(&mut self, exercise: &str, observer: &mut impl SessionObserver) -> SessionSnapshot {
        self.dispatch(Event::start(exercise), observer)
    }

    pub fn pause(&mut self, observer: &mut impl SessionObserver) -> SessionSnapshot {
        self.dispatch(Event::Pause, observer)
    }

    pub fn resume(&mut self, observer: &mut impl SessionObserver) -> SessionSnapshot {
        self.dispatch(Event::Resume, observer)
    }

    /// Pause when running, resume when paused, otherwise nothing
    pub fn toggle_pause(&mut self, observer: &mut impl SessionObserver) -> SessionSnapshot {
        match self.state.status {
            SessionStatus::Running => self.pause(observer),
            SessionStatus::Paused => self.resume(observer),
            SessionStatus::Idle | SessionStatus::Completed => self.snapshot(),
        }
    }

    pub fn stop(&mut self, observer: &mut impl SessionObserver) -> SessionSnapshot {
        self.dispatch(Event::Stop, observer)
    }

    pub fn acknowledge(&mut self, observer: &mut impl SessionObserver) -> SessionSnapshot {
        self.dispatch(Event::Acknowledge, observer)
    }

    pub fn timer_fired(
        &mut self,
        fired: TimerFired,
        observer: &mut impl SessionObserver,
    ) -> SessionSnapshot {
        self.dispatch(Event::TimerFired(fired), observer)
    }

    /// Apply one event and execute the resulting effects
    pub fn dispatch(&mut self, event: Event, observer: &mut impl SessionObserver) -> SessionSnapshot {
        let result = transition(&self.state, &self.context, event.clone());

        if result.is_noop() {
            tracing::debug!(status = ?self.state.status, event = ?event, "Ignoring session event");
            return self.snapshot();
        }

        let old_status = self.state.status;
        self.state = result.new_state;
        if old_status != self.state.status {
            tracing::info!(
                exercise = self.state.exercise.as_deref().unwrap_or("-"),
                from = ?old_status,
                to = ?self.state.status,
                remaining = self.state.remaining_seconds,
                "Session status changed"
            );
        }

        for effect in result.effects {
            self.execute_effect(effect, observer);
        }

        self.snapshot()
    }

    fn execute_effect(&mut self, effect: Effect, observer: &mut impl SessionObserver) {
        match effect {
            Effect::ArmTimer { kind, every, epoch } => {
                // A kind is never armed twice
                if let Some(previous) = self.handles.remove(&kind) {
                    self.scheduler.cancel(previous);
                }
                let handle = self.scheduler.schedule(TimerRequest { kind, every, epoch });
                tracing::trace!(?kind, epoch, ?handle, "Timer armed");
                self.handles.insert(kind, handle);
            }
            Effect::CancelTimer { kind } => {
                if let Some(handle) = self.handles.remove(&kind) {
                    self.scheduler.cancel(handle);
                    tracing::trace!(?kind, ?handle, "Timer cancelled");
                }
            }
            Effect::OpenPlayer { title, description } => {
                observer.on_player_opened(&title, &description);
            }
            Effect::ClosePlayer => observer.on_player_closed(),
            Effect::ShowInstruction { text } => observer.on_instruction_change(text),
            Effect::Countdown { remaining_seconds } => observer.on_tick(remaining_seconds),
            Effect::StatusChanged { status } => observer.on_status_change(status),
            Effect::AwardPoints { points } => observer.on_award_points(points),
            Effect::ScrollLock { locked } => observer.on_scroll_lock(locked),
            Effect::Notify(notice) => observer.on_notify(notice),
        }
    }
}

impl<S: Scheduler> Drop for SessionRuntime<S> {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            self.scheduler.cancel(handle);
        }
    }
}
