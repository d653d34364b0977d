//! Occupancy counter core
//!
//! Hardware independent part of the occupancy counter firmware. Everything that
//! has a synchronization hazard or a timing contract lives here so it can be
//! exercised on the host:
//!
//! - [`occupancy`]: the bounded count and its two notification flags
//! - [`debounce`]: the global debounce gate used from interrupt context
//! - [`signal`]: interrupt to task hand-off (two counting, one binary)
//! - [`consumer`]: the Entry / Exit / Reset state machines
//! - [`indicator`]: occupancy bands for the RGB LED
//! - [`annunciator`]: buzzer patterns for the notification flags
//! - [`view`]: display content, the in-order view queue and the text sink the
//!   display driver implements
//!
//! The firmware binary owns the statics, the executors and the hardware.

#![cfg_attr(not(test), no_std)]

pub mod annunciator;
pub mod config;
pub mod consumer;
pub mod debounce;
pub mod indicator;
pub mod occupancy;
pub mod signal;
pub mod view;

pub use annunciator::{annunciate, Alert, ToneOutput, ToneStep};
pub use consumer::{Consumer, Outcome, Phase, Role};
pub use debounce::DebounceGate;
pub use indicator::{Band, Rgb};
pub use occupancy::{Admission, Departure, Occupancy, SharedOccupancy};
pub use signal::{Dispatch, EdgeDispatcher, EventSignals, Input, SignalError};
pub use view::{Line, TextSink, View, ViewQueue};
