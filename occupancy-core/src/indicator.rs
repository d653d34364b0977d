//! Occupancy bands for the RGB indicator
//!
//! The band is a pure function of the count; the indicator task holds no
//! state of its own and rewrites the LED every cycle.

use defmt::Format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Band {
    /// Nobody present
    Idle,
    /// Between one user and two short of capacity
    Normal,
    /// One place left
    Warning,
    /// Full
    Alert,
}

/// On/off state of the three LED channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct Rgb {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Band {
    pub fn classify(count: u8, capacity: u8) -> Self {
        if count == 0 {
            Band::Idle
        } else if count >= capacity {
            Band::Alert
        } else if count == capacity - 1 {
            Band::Warning
        } else {
            Band::Normal
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            Band::Idle => Rgb {
                red: false,
                green: false,
                blue: true,
            },
            Band::Normal => Rgb {
                red: false,
                green: true,
                blue: false,
            },
            // red and green mixed
            Band::Warning => Rgb {
                red: true,
                green: true,
                blue: false,
            },
            Band::Alert => Rgb {
                red: true,
                green: false,
                blue: false,
            },
        }
    }
}
