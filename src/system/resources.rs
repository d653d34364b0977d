//! Hardware Resource Management
//!
//! Assigns the board's pins and peripherals to the tasks that own them.
//! Nothing here is shared between tasks: every group is moved into exactly one
//! task at startup.
//!
//! # Resource Groups
//! - Buttons: entry (A), exit (B) and reset (joystick) push buttons, active low
//! - RGB LED: three digital channels of the occupancy indicator
//! - Buzzer: PWM slice driving the passive buzzer
//! - Display: I2C bus of the SSD1306 OLED

use assign_resources::assign_resources;
use embassy_rp::{peripherals, Peri};

/// I2C address of the SSD1306 OLED
pub const DISPLAY_ADDRESS: u8 = 0x3C;

/// I2C bus clock for the OLED
pub const DISPLAY_I2C_FREQUENCY: u32 = 400_000;

assign_resources! {
    /// Push buttons, pulled up, falling edge on press
    buttons: ButtonResources {
        entry: PIN_5,
        exit: PIN_6,
        reset: PIN_22,
    },
    /// Tri-color indicator LED
    rgb_led: RgbLedResources {
        red: PIN_13,
        green: PIN_11,
        blue: PIN_12,
    },
    /// Passive buzzer on PWM slice 2, channel B
    buzzer: BuzzerResources {
        slice: PWM_SLICE2,
        pin: PIN_21,
    },
    /// SSD1306 128x64 OLED
    display: DisplayResources {
        i2c: I2C1,
        sda: PIN_14,
        scl: PIN_15,
    },
}
