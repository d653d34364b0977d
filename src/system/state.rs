//! System State
//!
//! The occupancy count and the two notification flags, guarded by one mutex.
//! Only the entry, exit and reset consumers mutate it; the indicator and the
//! annunciator sample it.
//!
//! The reset consumer runs on an interrupt executor, so the mutex has to be a
//! `CriticalSectionRawMutex` rather than a thread mode one.
//!
//! # State Access Pattern
//! ```rust
//! let band = SYSTEM_STATE.lock().await.band();
//! // lock released at the end of the statement
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use occupancy_core::config::CAPACITY;
use occupancy_core::{Occupancy, SharedOccupancy};

/// Global occupancy, empty at power on
pub static SYSTEM_STATE: SharedOccupancy<CriticalSectionRawMutex> =
    Mutex::new(Occupancy::new(CAPACITY));
