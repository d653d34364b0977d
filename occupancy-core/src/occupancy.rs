//! Occupancy State
//!
//! The bounded count of present users plus the two transient notification
//! flags that feed the annunciator.
//!
//! # Invariants
//! - `count` stays within `0..=capacity` under every transition
//! - the flags are sticky booleans: setting an already set flag is a no-op, so
//!   alerts never queue up
//!
//! # Access Pattern
//! The state is shared as a [`SharedOccupancy`] and only ever touched while
//! holding its lock:
//! ```rust,ignore
//! let mut state = SYSTEM_STATE.lock().await;
//! let admission = state.admit();
//! // lock released when `state` goes out of scope
//! ```

use defmt::Format;
use embassy_sync::mutex::Mutex;

use crate::annunciator::Alert;
use crate::indicator::Band;

/// The single exclusive-access mechanism guarding the count and both flags
pub type SharedOccupancy<M> = Mutex<M, Occupancy>;

/// Result of an entry attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Admission {
    /// The user was counted
    Admitted { count: u8, vacancies: u8 },
    /// Already at capacity, the count is unchanged and the capacity flag is set
    Full { count: u8 },
}

/// Result of an exit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Departure {
    /// The user was removed from the count
    Removed { count: u8, vacancies: u8 },
    /// Nobody was present, the count stays at zero
    NothingToRemove,
}

/// Occupancy count and notification flags
#[derive(Debug, Clone, PartialEq, Eq, Format)]
pub struct Occupancy {
    count: u8,
    capacity: u8,
    /// Set when an entry is rejected at capacity, cleared by the annunciator
    capacity_reached: bool,
    /// Set on every reset, cleared by the annunciator
    reset_occurred: bool,
}

impl Occupancy {
    /// Empty room with the given capacity and no pending notifications
    pub const fn new(capacity: u8) -> Self {
        Self {
            count: 0,
            capacity,
            capacity_reached: false,
            reset_occurred: false,
        }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    /// Remaining free places
    pub fn vacancies(&self) -> u8 {
        self.capacity - self.count
    }

    /// Counts one more user unless the room is full
    pub fn admit(&mut self) -> Admission {
        if self.count < self.capacity {
            self.count += 1;
            Admission::Admitted {
                count: self.count,
                vacancies: self.vacancies(),
            }
        } else {
            self.capacity_reached = true;
            Admission::Full { count: self.count }
        }
    }

    /// Removes one user unless the room is empty.
    ///
    /// Underflow is reported to the caller only; it never raises an alert.
    pub fn release(&mut self) -> Departure {
        if self.count > 0 {
            self.count -= 1;
            Departure::Removed {
                count: self.count,
                vacancies: self.vacancies(),
            }
        } else {
            Departure::NothingToRemove
        }
    }

    /// Drops the count to zero and raises the reset flag. Returns the count
    /// before the reset.
    pub fn reset(&mut self) -> u8 {
        let previous = self.count;
        self.count = 0;
        self.reset_occurred = true;
        previous
    }

    /// Indicator band for the current count
    pub fn band(&self) -> Band {
        Band::classify(self.count, self.capacity)
    }

    pub fn capacity_reached(&self) -> bool {
        self.capacity_reached
    }

    pub fn reset_occurred(&self) -> bool {
        self.reset_occurred
    }

    /// Next alert the annunciator should play, capacity before reset
    pub fn pending_alert(&self) -> Option<Alert> {
        if self.capacity_reached {
            Some(Alert::CapacityReached)
        } else if self.reset_occurred {
            Some(Alert::ResetOccurred)
        } else {
            None
        }
    }

    /// Clears the flag behind `alert` once its pattern has been played
    pub fn acknowledge(&mut self, alert: Alert) {
        match alert {
            Alert::CapacityReached => self.capacity_reached = false,
            Alert::ResetOccurred => self.reset_occurred = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn admit_counts_until_capacity() {
        let mut state = Occupancy::new(3);
        assert_eq!(
            state.admit(),
            Admission::Admitted {
                count: 1,
                vacancies: 2
            }
        );
        state.admit();
        assert_eq!(
            state.admit(),
            Admission::Admitted {
                count: 3,
                vacancies: 0
            }
        );
        assert!(!state.capacity_reached());
    }

    #[test]
    fn admit_at_capacity_is_idempotent_and_raises_flag_again() {
        let mut state = Occupancy::new(2);
        state.admit();
        state.admit();

        for _ in 0..5 {
            assert_eq!(state.admit(), Admission::Full { count: 2 });
            assert_eq!(state.count(), 2);
            assert!(state.capacity_reached());
            state.acknowledge(Alert::CapacityReached);
            assert!(!state.capacity_reached());
        }
    }

    #[test]
    fn repeated_rejections_do_not_queue_alerts() {
        let mut state = Occupancy::new(1);
        state.admit();
        state.admit();
        state.admit();
        assert_eq!(state.pending_alert(), Some(Alert::CapacityReached));
        state.acknowledge(Alert::CapacityReached);
        assert_eq!(state.pending_alert(), None);
    }

    #[test]
    fn release_at_zero_is_silent() {
        let mut state = Occupancy::new(10);
        for _ in 0..3 {
            assert_eq!(state.release(), Departure::NothingToRemove);
            assert_eq!(state.count(), 0);
        }
        assert_eq!(state.pending_alert(), None);
    }

    #[test]
    fn release_reports_vacancies() {
        let mut state = Occupancy::new(10);
        state.admit();
        state.admit();
        assert_eq!(
            state.release(),
            Departure::Removed {
                count: 1,
                vacancies: 9
            }
        );
    }

    #[test]
    fn reset_zeroes_from_any_count() {
        for start in 0..=10 {
            let mut state = Occupancy::new(10);
            for _ in 0..start {
                state.admit();
            }
            assert_eq!(state.reset(), start);
            assert_eq!(state.count(), 0);
            assert!(state.reset_occurred());
        }
    }

    #[test]
    fn capacity_alert_takes_priority_over_reset() {
        let mut state = Occupancy::new(1);
        state.admit();
        state.admit();
        state.reset();

        assert_eq!(state.pending_alert(), Some(Alert::CapacityReached));
        state.acknowledge(Alert::CapacityReached);
        assert_eq!(state.pending_alert(), Some(Alert::ResetOccurred));
        state.acknowledge(Alert::ResetOccurred);
        assert_eq!(state.pending_alert(), None);
    }

    #[test]
    fn count_stays_in_bounds_for_mixed_sequences() {
        // deterministic pseudo random walk over entries and exits
        let mut state = Occupancy::new(10);
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                state.release();
            } else {
                state.admit();
            }
            assert!(state.count() <= state.capacity());
            assert_eq!(state.vacancies(), state.capacity() - state.count());
        }
    }
}
