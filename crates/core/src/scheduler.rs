//! Game loop scheduler - a single periodic timer over a virtual millisecond clock
//!
//! The scheduler never fires on its own. The owner feeds elapsed time into
//! [`GameLoopScheduler::poll`], which reports at most one due tick per call,
//! so the owner can react (reschedule, stop) before the next tick is due.
//! There is only ever one timer: starting a running scheduler replaces it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameLoopScheduler {
    /// Tick interval while running
    interval_ms: Option<u32>,
    /// Time accumulated since the last tick (or since start)
    phase_ms: u32,
}

impl GameLoopScheduler {
    /// A stopped scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking every `interval_ms` (clamped to at least 1ms), phase reset
    pub fn start(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms.max(1));
        self.phase_ms = 0;
    }

    /// Cancel the timer; no tick is delivered until the next `start`
    pub fn stop(&mut self) {
        self.interval_ms = None;
        self.phase_ms = 0;
    }

    pub fn reschedule(&mut self, interval_ms: u32) {
        self.stop();
        self.start(interval_ms);
    }

    pub fn is_running(&self) -> bool {
        self.interval_ms.is_some()
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    /// Milliseconds until the next tick, or None while stopped
    pub fn time_until_next_tick(&self) -> Option<u32> {
        self.interval_ms.map(|interval| interval - self.phase_ms)
    }

    /// Spend up to `budget_ms` of elapsed time.
    ///
    /// Returns `Some(consumed)` when a tick is due within the budget, where
    /// `consumed` is the time up to that tick. Returns None when no tick is
    /// due; the whole budget is then absorbed into the phase.
    pub fn poll(&mut self, budget_ms: u32) -> Option<u32> {
        let interval = self.interval_ms?;
        let due = interval - self.phase_ms;
        if budget_ms >= due {
            self.phase_ms = 0;
            Some(due)
        } else {
            self.phase_ms += budget_ms;
            None
        }
    }
}
