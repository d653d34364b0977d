//! Event Signals
//!
//! Hand-off from the interrupt path to the consumer tasks. Entry and Exit are
//! counting signals backed by a bounded channel of unit events, Reset is a
//! binary signal that holds at most one pending wake-up.
//!
//! Posting never blocks. When a counting signal is full the event is dropped
//! and reported as [`SignalError::Saturated`].

use defmt::Format;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant};

use crate::debounce::DebounceGate;

/// The three physical inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Input {
    /// Button A
    Entry,
    /// Button B
    Exit,
    /// Joystick button
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum SignalError {
    /// The counting signal already holds its maximum of pending events
    Saturated(Input),
}

/// Signals for the three consumers
pub struct EventSignals<M: RawMutex, const DEPTH: usize> {
    entry: Channel<M, (), DEPTH>,
    exit: Channel<M, (), DEPTH>,
    reset: Signal<M, ()>,
}

impl<M: RawMutex, const DEPTH: usize> EventSignals<M, DEPTH> {
    pub const fn new() -> Self {
        Self {
            entry: Channel::new(),
            exit: Channel::new(),
            reset: Signal::new(),
        }
    }

    /// Non-blocking post, safe from interrupt context
    pub fn post(&self, input: Input) -> Result<(), SignalError> {
        match input {
            Input::Entry => self
                .entry
                .try_send(())
                .map_err(|_| SignalError::Saturated(input)),
            Input::Exit => self
                .exit
                .try_send(())
                .map_err(|_| SignalError::Saturated(input)),
            Input::Reset => {
                self.reset.signal(());
                Ok(())
            }
        }
    }

    /// Blocks until one event for `input` is available and consumes it
    pub async fn wait(&self, input: Input) {
        match input {
            Input::Entry => self.entry.receive().await,
            Input::Exit => self.exit.receive().await,
            Input::Reset => self.reset.wait().await,
        }
    }

    /// Number of events waiting for their consumer
    pub fn pending(&self, input: Input) -> usize {
        match input {
            Input::Entry => self.entry.len(),
            Input::Exit => self.exit.len(),
            Input::Reset => usize::from(self.reset.signaled()),
        }
    }
}

impl<M: RawMutex, const DEPTH: usize> Default for EventSignals<M, DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened to a raw edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Dispatch {
    /// Accepted and posted to the matching signal
    Posted,
    /// Inside the debounce window, discarded
    Debounced,
    /// Accepted but the signal was full
    Dropped(SignalError),
}

/// Debounce gate in front of the three signals. This is the whole interrupt
/// path: timestamp check, then a non-blocking post.
pub struct EdgeDispatcher<M: RawMutex, const DEPTH: usize> {
    gate: DebounceGate,
    signals: EventSignals<M, DEPTH>,
}

impl<M: RawMutex, const DEPTH: usize> EdgeDispatcher<M, DEPTH> {
    pub const fn new(window: Duration) -> Self {
        Self {
            gate: DebounceGate::new(window),
            signals: EventSignals::new(),
        }
    }

    pub fn on_edge(&self, input: Input, now: Instant) -> Dispatch {
        if !self.gate.accept(now) {
            return Dispatch::Debounced;
        }
        match self.signals.post(input) {
            Ok(()) => Dispatch::Posted,
            Err(e) => Dispatch::Dropped(e),
        }
    }

    pub fn signals(&self) -> &EventSignals<M, DEPTH> {
        &self.signals
    }

    pub fn gate(&self) -> &DebounceGate {
        &self.gate
    }
}
