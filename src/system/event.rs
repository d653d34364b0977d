//! Button Events
//!
//! Debounce gate and the three consumer signals, as one static the edge task
//! dispatches into and the consumer tasks wait on.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Instant};
use occupancy_core::config::{DEBOUNCE_WINDOW, SIGNAL_DEPTH};
use occupancy_core::{Dispatch, EdgeDispatcher, EventSignals, Input};

/// Shared debounce window in front of the entry, exit and reset signals
static EDGES: EdgeDispatcher<CriticalSectionRawMutex, SIGNAL_DEPTH> =
    EdgeDispatcher::new(DEBOUNCE_WINDOW);

/// Runs a falling edge through the debounce gate and posts it. Never blocks.
pub fn dispatch(input: Input) -> Dispatch {
    EDGES.on_edge(input, Instant::now())
}

/// Quiet period the gate enforces across all three buttons
pub fn debounce_window() -> Duration {
    EDGES.gate().window()
}

/// Signals the consumer tasks wait on
pub fn signals() -> &'static EventSignals<CriticalSectionRawMutex, SIGNAL_DEPTH> {
    EDGES.signals()
}
