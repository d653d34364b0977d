//! RGB LED Indicator Module
//!
//! Shows how full the room is on the tri-color LED:
//! - Blue: nobody present
//! - Green: room for more
//! - Yellow (red + green): one place left
//! - Red: full
//!
//! The task does not wait on any signal. It samples the count at a fixed
//! cadence and rewrites all three channels every cycle, changed or not.
use crate::system::resources::RgbLedResources;
use crate::system::state::SYSTEM_STATE;
use defmt::info;
use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;
use occupancy_core::config::INDICATOR_PERIOD;
use occupancy_core::Band;

/// Drives the RGB LED from the occupancy band.
#[embassy_executor::task]
pub async fn rgb_led_indicate(r: RgbLedResources) {
    let mut red = Output::new(r.red, Level::Low);
    let mut green = Output::new(r.green, Level::Low);
    let mut blue = Output::new(r.blue, Level::Low);

    info!("RGB LED indicator started");

    let mut last_band: Option<Band> = None;

    loop {
        let band = SYSTEM_STATE.lock().await.band();

        if last_band != Some(band) {
            info!("Occupancy band: {}", band);
            last_band = Some(band);
        }

        let rgb = band.color();
        light(&mut red, rgb.red);
        light(&mut green, rgb.green);
        light(&mut blue, rgb.blue);

        Timer::after(INDICATOR_PERIOD).await;
    }
}

// The LED channels are active high.
fn light(led: &mut Output<'static>, on: bool) {
    led.set_level(if on { Level::High } else { Level::Low });
}
