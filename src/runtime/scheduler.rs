//! Tokio-backed timer scheduling

use super::traits::{Scheduler, TimerHandle, TimerRequest};
use crate::session::TimerFired;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Scheduler that runs each timer as a task on the current tokio runtime
///
/// Fires are sent over a channel; the host's event loop reads them and feeds
/// them to the session runtime, so all session mutation stays on one task.
pub struct TokioScheduler {
    fired_tx: mpsc::UnboundedSender<TimerFired>,
    tokens: HashMap<TimerHandle, CancellationToken>,
    next_handle: u64,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            fired_tx,
            tokens: HashMap::new(),
            next_handle: 0,
        };
        (scheduler, fired_rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, request: TimerRequest) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let fired_tx = self.fired_tx.clone();
        let fired = TimerFired {
            kind: request.kind,
            epoch: request.epoch,
        };

        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + request.every, request.every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        if fired_tx.send(fired).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::trace!(kind = ?fired.kind, epoch = fired.epoch, "Timer task exited");
        });

        self.tokens.insert(handle, token);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(token) = self.tokens.remove(&handle) {
            token.cancel();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, token) in self.tokens.drain() {
            token.cancel();
        }
    }
}
