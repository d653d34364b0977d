//! Compile time configuration
//!
//! Timing and capacity constants shared by the core and the firmware tasks.
//! None of these are runtime mutable.

use embassy_time::Duration;

/// Maximum number of users present at once
pub const CAPACITY: u8 = 10;

/// Quiet period after an accepted edge, shared by all three buttons
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(250);

/// Pending events the Entry and Exit signals can hold
pub const SIGNAL_DEPTH: usize = 10;

/// Views the display task can fall behind by before a consumer waits
pub const VIEW_DEPTH: usize = 4;

/// How long the Entry view stays up before the next entry is handled
pub const ENTRY_DWELL: Duration = Duration::from_millis(500);

/// How long the Exit view stays up before the next exit is handled
pub const EXIT_DWELL: Duration = Duration::from_millis(500);

/// How long the reset view is held before the idle view replaces it
pub const RESET_HOLD: Duration = Duration::from_millis(1500);

/// RGB indicator refresh cadence
pub const INDICATOR_PERIOD: Duration = Duration::from_millis(100);

/// Annunciator yield period while no notification flag is set
pub const ANNUNCIATOR_IDLE_POLL: Duration = Duration::from_millis(10);

/// Capacity reached: one short low tone
pub const CAPACITY_TONE_HZ: u32 = 330;
pub const CAPACITY_TONE: Duration = Duration::from_millis(150);

/// Reset: two beeps of a higher tone separated by a gap
pub const RESET_TONE_HZ: u32 = 440;
pub const RESET_BEEP: Duration = Duration::from_millis(100);
pub const RESET_GAP: Duration = Duration::from_millis(100);
