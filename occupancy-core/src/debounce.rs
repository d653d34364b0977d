//! Debounce gate
//!
//! Filters switch bounce on the three buttons. The window is global: an edge on
//! any input less than the quiet period after the last accepted edge on any
//! input is discarded.
//!
//! The gate is called from interrupt context, so it never blocks and never
//! takes a lock a task could hold. The last accepted timestamp is a single
//! atomic; `portable-atomic` provides the 64 bit CAS on cores without one.

use embassy_time::{Duration, Instant};
use portable_atomic::{AtomicU64, Ordering};

/// No edge accepted yet
const NEVER: u64 = u64::MAX;

pub struct DebounceGate {
    window: Duration,
    last_accepted: AtomicU64,
}

impl DebounceGate {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: AtomicU64::new(NEVER),
        }
    }

    /// Accepts `now` iff at least one window has passed since the last
    /// accepted edge. The first edge ever is always accepted. A discarded
    /// edge changes nothing.
    pub fn accept(&self, now: Instant) -> bool {
        let now = now.as_ticks();
        let last = self.last_accepted.load(Ordering::Acquire);

        if last != NEVER && now.saturating_sub(last) < self.window.as_ticks() {
            return false;
        }

        self.last_accepted
            .compare_exchange(last, now, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Timestamp of the last accepted edge
    pub fn last_accepted(&self) -> Option<Instant> {
        match self.last_accepted.load(Ordering::Acquire) {
            NEVER => None,
            ticks => Some(Instant::from_ticks(ticks)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
