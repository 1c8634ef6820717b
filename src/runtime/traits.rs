//! Trait abstractions for runtime I/O
//!
//! These traits are the ports the host implements: timers, randomness and
//! presentation. Tests plug in mock implementations from `testing`.

use crate::notifications::Notice;
use crate::session::{SessionStatus, TimerKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// ============================================================================
// Scheduling
// ============================================================================

/// Request for a periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub kind: TimerKind,
    pub every: Duration,
    /// Echoed back in every fire so stale fires can be told apart
    pub epoch: u64,
}

/// Opaque handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Periodic scheduling capability
///
/// Fires are delivered by the host as `Event::TimerFired`, never by calling
/// back into the session directly.
pub trait Scheduler {
    /// Start a periodic timer; the first fire is one period from now
    fn schedule(&mut self, request: TimerRequest) -> TimerHandle;

    /// Stop a timer. Once this returns the timer delivers nothing further.
    fn cancel(&mut self, handle: TimerHandle);
}

// ============================================================================
// Randomness
// ============================================================================

/// Source of uniform random numbers in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index into a collection of `len` items (`len > 0`)
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn pick_index(&mut self, len: usize) -> usize {
        let index = (self.next_unit() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}

/// Production random source backed by `StdRng`
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic source for reproducible runs
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SystemRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

// ============================================================================
// Presentation
// ============================================================================

/// Receiver for everything a session wants shown
///
/// All methods default to no-ops so hosts only implement what they render.
#[allow(unused_variables)]
pub trait SessionObserver {
    /// Countdown changed
    fn on_tick(&mut self, remaining_seconds: u32) {}

    fn on_instruction_change(&mut self, text: &str) {}

    fn on_status_change(&mut self, status: SessionStatus) {}

    /// Wellness points earned by stopping or finishing
    fn on_award_points(&mut self, points: u8) {}

    fn on_player_opened(&mut self, title: &str, description: &str) {}

    fn on_player_closed(&mut self) {}

    /// Background scrolling suspended (`true`) or restored (`false`)
    fn on_scroll_lock(&mut self, locked: bool) {}

    fn on_notify(&mut self, notice: Notice) {}
}
