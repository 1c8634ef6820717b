//! Pure state transition function
//!
//! Given the same session, context and event this always produces the same
//! result. Timers are requested and cancelled through effects; the runtime
//! carries them out before control returns to the host.

use super::catalog;
use super::effect::{FINISH_POINTS, STOP_POINTS};
use super::state::{ArmedTimers, PauseBehavior, SessionContext, SessionStatus, TimerKind};
use super::{Effect, Event, ExerciseSession, TimerFired};
use crate::notifications::NotificationKind;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ExerciseSession,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: ExerciseSession) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    /// The event did not apply in this state
    #[must_use]
    pub fn unchanged(state: &ExerciseSession) -> Self {
        Self::new(state.clone())
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// True when the event was ignored
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Pure transition function
///
/// Every (state, event) pair is accepted; pairs with no meaning return the
/// session unchanged with no effects.
#[must_use]
pub fn transition(state: &ExerciseSession, context: &SessionContext, event: Event) -> TransitionResult {
    match (state.status, event) {
        // Start is valid from anywhere; an active session is force-stopped first
        (_, Event::Start { exercise }) => start(state, context, exercise),

        (SessionStatus::Running, Event::Pause) => pause(state, context),

        (SessionStatus::Paused, Event::Resume) => resume(state, context),

        (SessionStatus::Running | SessionStatus::Paused, Event::Stop) => stop(state),

        // Stopping a completed session just dismisses it
        (SessionStatus::Completed, Event::Stop | Event::Acknowledge) => acknowledge(state),

        (SessionStatus::Running, Event::TimerFired(TimerFired { kind: TimerKind::Tick, epoch }))
            if state.timers.tick == Some(epoch) =>
        {
            tick(state)
        }

        // Under the legacy pause behaviour rotation stays armed while paused
        (status, Event::TimerFired(TimerFired { kind: TimerKind::Rotation, epoch }))
            if status.is_active() && state.timers.rotation == Some(epoch) =>
        {
            rotate(state)
        }

        _ => TransitionResult::unchanged(state),
    }
}

fn start(state: &ExerciseSession, context: &SessionContext, exercise: String) -> TransitionResult {
    let script = catalog::lookup(&exercise);
    let tick_epoch = state.last_epoch + 1;
    let rotation_epoch = state.last_epoch + 2;

    let description = format!("Follow the guided {} exercise", exercise.to_lowercase());
    let message = format!("{exercise} has begun. Find a comfortable position.");

    let new_state = ExerciseSession {
        exercise: Some(exercise.clone()),
        script,
        status: SessionStatus::Running,
        remaining_seconds: context.session_seconds,
        step_index: 0,
        instruction: Some(script.initial_prompt),
        timers: ArmedTimers {
            tick: Some(tick_epoch),
            rotation: Some(rotation_epoch),
        },
        last_epoch: rotation_epoch,
    };

    TransitionResult::new(new_state)
        .with_effects(cancel_armed(&state.timers))
        .with_effect(Effect::OpenPlayer {
            title: exercise,
            description,
        })
        .with_effect(Effect::ShowInstruction {
            text: script.initial_prompt,
        })
        .with_effect(Effect::Countdown {
            remaining_seconds: context.session_seconds,
        })
        .with_effect(Effect::status(SessionStatus::Running))
        .with_effect(Effect::arm(TimerKind::Tick, context.tick_interval, tick_epoch))
        .with_effect(Effect::arm(
            TimerKind::Rotation,
            context.rotation_interval,
            rotation_epoch,
        ))
        .with_effect(Effect::ScrollLock { locked: true })
        .with_effect(Effect::notify(
            NotificationKind::Success,
            "Exercise Started",
            message,
        ))
}

fn pause(state: &ExerciseSession, context: &SessionContext) -> TransitionResult {
    let mut new_state = state.clone();
    new_state.status = SessionStatus::Paused;
    new_state.timers.tick = None;

    let mut effects = vec![Effect::cancel(TimerKind::Tick)];
    if context.pause_behavior == PauseBehavior::SuspendAll && state.timers.rotation.is_some() {
        new_state.timers.rotation = None;
        effects.push(Effect::cancel(TimerKind::Rotation));
    }

    TransitionResult::new(new_state)
        .with_effects(effects)
        .with_effect(Effect::status(SessionStatus::Paused))
        .with_effect(Effect::notify(
            NotificationKind::Warning,
            "Exercise Paused",
            "Exercise has been paused.",
        ))
}

fn resume(state: &ExerciseSession, context: &SessionContext) -> TransitionResult {
    let mut new_state = state.clone();
    new_state.status = SessionStatus::Running;

    let tick_epoch = new_state.last_epoch + 1;
    new_state.last_epoch = tick_epoch;
    new_state.timers.tick = Some(tick_epoch);
    let mut effects = vec![Effect::arm(TimerKind::Tick, context.tick_interval, tick_epoch)];

    // Step index is kept; only the timer restarts
    if new_state.timers.rotation.is_none() {
        let rotation_epoch = new_state.last_epoch + 1;
        new_state.last_epoch = rotation_epoch;
        new_state.timers.rotation = Some(rotation_epoch);
        effects.push(Effect::arm(
            TimerKind::Rotation,
            context.rotation_interval,
            rotation_epoch,
        ));
    }

    TransitionResult::new(new_state)
        .with_effects(effects)
        .with_effect(Effect::status(SessionStatus::Running))
        .with_effect(Effect::notify(
            NotificationKind::Info,
            "Exercise Resumed",
            "Exercise has been resumed.",
        ))
}

fn stop(state: &ExerciseSession) -> TransitionResult {
    let new_state = ExerciseSession {
        last_epoch: state.last_epoch,
        ..ExerciseSession::default()
    };

    TransitionResult::new(new_state)
        .with_effects(cancel_armed(&state.timers))
        .with_effect(Effect::ClosePlayer)
        .with_effect(Effect::ScrollLock { locked: false })
        .with_effect(Effect::status(SessionStatus::Idle))
        .with_effect(Effect::notify(
            NotificationKind::Success,
            "Exercise Completed",
            "Great job completing your mindfulness practice!",
        ))
        .with_effect(Effect::AwardPoints {
            points: STOP_POINTS,
        })
}

fn acknowledge(state: &ExerciseSession) -> TransitionResult {
    let new_state = ExerciseSession {
        last_epoch: state.last_epoch,
        ..ExerciseSession::default()
    };

    TransitionResult::new(new_state).with_effect(Effect::status(SessionStatus::Idle))
}

fn tick(state: &ExerciseSession) -> TransitionResult {
    let mut new_state = state.clone();
    new_state.remaining_seconds = state.remaining_seconds.saturating_sub(1);

    let result = TransitionResult::new(new_state).with_effect(Effect::Countdown {
        remaining_seconds: state.remaining_seconds.saturating_sub(1),
    });

    if result.new_state.remaining_seconds == 0 {
        finish(result)
    } else {
        result
    }
}

/// Natural completion: same cleanup as stop, bigger reward
fn finish(result: TransitionResult) -> TransitionResult {
    let cancels = cancel_armed(&result.new_state.timers);
    let mut result = result.with_effects(cancels);
    result.new_state.status = SessionStatus::Completed;
    result.new_state.timers = ArmedTimers::default();

    result
        .with_effect(Effect::ClosePlayer)
        .with_effect(Effect::ScrollLock { locked: false })
        .with_effect(Effect::status(SessionStatus::Completed))
        .with_effect(Effect::notify(
            NotificationKind::Success,
            "Exercise Completed",
            "Excellent work! Regular practice builds resilience.",
        ))
        .with_effect(Effect::AwardPoints {
            points: FINISH_POINTS,
        })
}

fn rotate(state: &ExerciseSession) -> TransitionResult {
    let steps = state.script.steps;
    let mut new_state = state.clone();
    new_state.step_index = (state.step_index + 1) % steps.len();
    let text = steps[new_state.step_index];
    new_state.instruction = Some(text);

    TransitionResult::new(new_state).with_effect(Effect::ShowInstruction { text })
}

fn cancel_armed(timers: &ArmedTimers) -> Vec<Effect> {
    [TimerKind::Tick, TimerKind::Rotation]
        .into_iter()
        .filter(|kind| timers.get(*kind).is_some())
        .map(Effect::cancel)
        .collect()
}
