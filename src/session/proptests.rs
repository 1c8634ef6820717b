//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::catalog::{self, FALLBACK_SCRIPT};
use super::state::ArmedTimers;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context(pause_behavior: PauseBehavior) -> SessionContext {
    SessionContext {
        session_seconds: 20,
        pause_behavior,
        ..SessionContext::default()
    }
}

/// Abstract operation, resolved against the live session so timer fires can
/// target either the armed epoch or a stale one
#[derive(Debug, Clone)]
enum Op {
    Start(usize),
    Pause,
    Resume,
    Stop,
    Acknowledge,
    Tick { stale: bool },
    Rotate { stale: bool },
}

fn exercise_name(index: usize) -> String {
    catalog::exercise_names()
        .nth(index)
        .map_or_else(|| "Unlisted Exercise".to_string(), str::to_string)
}

fn resolve(op: &Op, state: &ExerciseSession) -> Event {
    let epoch_for = |armed: Option<u64>, stale: bool| match (armed, stale) {
        (Some(epoch), false) => epoch,
        // Anything that is not armed counts as stale
        _ => state.last_epoch + 7,
    };
    match op {
        Op::Start(index) => Event::start(exercise_name(*index)),
        Op::Pause => Event::Pause,
        Op::Resume => Event::Resume,
        Op::Stop => Event::Stop,
        Op::Acknowledge => Event::Acknowledge,
        Op::Tick { stale } => Event::tick(epoch_for(state.timers.tick, *stale)),
        Op::Rotate { stale } => Event::rotate(epoch_for(state.timers.rotation, *stale)),
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (0usize..8).prop_map(Op::Start),
        2 => Just(Op::Pause),
        2 => Just(Op::Resume),
        1 => Just(Op::Stop),
        1 => Just(Op::Acknowledge),
        8 => any::<bool>().prop_map(|stale| Op::Tick { stale }),
        3 => any::<bool>().prop_map(|stale| Op::Rotate { stale }),
    ]
}

fn arb_pause_behavior() -> impl Strategy<Value = PauseBehavior> {
    prop_oneof![
        Just(PauseBehavior::SuspendAll),
        Just(PauseBehavior::LegacyTickOnly),
    ]
}

fn check_invariants(
    state: &ExerciseSession,
    context: &SessionContext,
) -> Result<(), TestCaseError> {
    prop_assert!(state.remaining_seconds <= context.session_seconds);

    for epoch in [state.timers.tick, state.timers.rotation].into_iter().flatten() {
        prop_assert!(epoch <= state.last_epoch);
    }

    match state.status {
        SessionStatus::Idle => {
            prop_assert!(state.exercise.is_none());
            prop_assert_eq!(state.timers, ArmedTimers::default());
            prop_assert_eq!(state.step_index, 0);
        }
        SessionStatus::Running => {
            prop_assert!(state.timers.tick.is_some());
            prop_assert!(state.timers.rotation.is_some());
            prop_assert!(state.remaining_seconds > 0);
        }
        SessionStatus::Paused => {
            prop_assert!(state.timers.tick.is_none());
            if context.pause_behavior == PauseBehavior::SuspendAll {
                prop_assert!(state.timers.rotation.is_none());
            }
        }
        SessionStatus::Completed => {
            prop_assert_eq!(state.timers, ArmedTimers::default());
            prop_assert_eq!(state.remaining_seconds, 0);
        }
    }

    if state.exercise.is_some() {
        prop_assert!(state.step_index < state.script.steps.len());
    }
    Ok(())
}

// ============================================================================
// Invariants over arbitrary event sequences
// ============================================================================

proptest! {
    #[test]
    fn prop_invariants_hold(
        ops in proptest::collection::vec(arb_op(), 0..200),
        pause_behavior in arb_pause_behavior(),
    ) {
        let context = test_context(pause_behavior);
        let mut state = ExerciseSession::default();

        for op in &ops {
            let previous_epoch = state.last_epoch;
            let result = transition(&state, &context, resolve(op, &state));
            state = result.new_state;
            prop_assert!(state.last_epoch >= previous_epoch, "epochs only grow");
            check_invariants(&state, &context)?;
        }
    }

    /// Stale timer fires never mutate the session
    #[test]
    fn prop_stale_fires_are_inert(
        ops in proptest::collection::vec(arb_op(), 0..60),
        rotate in any::<bool>(),
    ) {
        let context = test_context(PauseBehavior::SuspendAll);
        let mut state = ExerciseSession::default();
        for op in &ops {
            state = transition(&state, &context, resolve(op, &state)).new_state;
        }

        let stale_op = if rotate { Op::Rotate { stale: true } } else { Op::Tick { stale: true } };
        let result = transition(&state, &context, resolve(&stale_op, &state));
        prop_assert!(result.is_noop());
        prop_assert_eq!(result.new_state, state);
    }

    /// Only Start does anything from Idle
    #[test]
    fn prop_idle_ignores_everything_but_start(op in arb_op()) {
        prop_assume!(!matches!(op, Op::Start(_)));
        let context = test_context(PauseBehavior::SuspendAll);
        let state = ExerciseSession::default();

        let result = transition(&state, &context, resolve(&op, &state));
        prop_assert!(result.is_noop());
        prop_assert_eq!(result.new_state, state);
    }

    /// Ticks delivered while paused do not move the countdown
    #[test]
    fn prop_paused_time_is_frozen(
        running_ticks in 0u32..10,
        paused_ticks in 0u32..30,
    ) {
        let context = test_context(PauseBehavior::SuspendAll);
        let mut state = transition(&ExerciseSession::default(), &context, Event::start("Box Breathing")).new_state;
        for _ in 0..running_ticks {
            state = transition(&state, &context, resolve(&Op::Tick { stale: false }, &state)).new_state;
        }
        let old_epoch = state.timers.tick;
        state = transition(&state, &context, Event::Pause).new_state;
        let frozen = state.remaining_seconds;

        for _ in 0..paused_ticks {
            let epoch = old_epoch.unwrap_or_default();
            state = transition(&state, &context, Event::tick(epoch)).new_state;
        }
        prop_assert_eq!(state.remaining_seconds, frozen);
        prop_assert_eq!(frozen, context.session_seconds - running_ticks);
    }

    /// The step index is the rotation count modulo the number of steps
    #[test]
    fn prop_rotation_is_cyclic(index in 0usize..7, rotations in 0usize..40) {
        let context = SessionContext::default();
        let name = exercise_name(index);
        let mut state = transition(&ExerciseSession::default(), &context, Event::start(name.clone())).new_state;
        for _ in 0..rotations {
            state = transition(&state, &context, resolve(&Op::Rotate { stale: false }, &state)).new_state;
        }

        let steps = catalog::lookup(&name).steps;
        prop_assert_eq!(state.step_index, rotations % steps.len());
        if rotations > 0 {
            prop_assert_eq!(state.instruction, Some(steps[state.step_index]));
        }
    }
}

#[test]
fn test_unlisted_exercise_resolves_to_fallback() {
    assert_eq!(catalog::lookup(&exercise_name(100)), &FALLBACK_SCRIPT);
}
