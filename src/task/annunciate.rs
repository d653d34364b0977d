//! Buzzer annunciator
//!
//! Polls the two notification flags and plays the matching pattern on the
//! passive buzzer: one short low tone when an entry was rejected at capacity,
//! two higher beeps after a reset. One pattern per cycle, capacity first; a
//! flag that is still set is picked up on the next cycle.

use crate::system::resources::BuzzerResources;
use crate::system::state::SYSTEM_STATE;
use defmt::info;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::Timer;
use occupancy_core::config::ANNUNCIATOR_IDLE_POLL;
use occupancy_core::{annunciate as play_pending, ToneOutput};

/// System clock divider, brings the PWM counter down to 1 MHz
const PWM_DIVIDER: u8 = 125;

/// PWM counter rate after the divider
const PWM_COUNTER_HZ: u32 = 1_000_000;

/// Square wave tone generator on PWM channel B
struct Buzzer {
    pwm: Pwm<'static>,
    config: Config,
}

impl Buzzer {
    fn new(r: BuzzerResources) -> Self {
        let mut config = Config::default();
        config.divider = PWM_DIVIDER.into();
        config.top = 1000;
        config.compare_b = 0;
        let pwm = Pwm::new_output_b(r.slice, r.pin, config.clone());
        Self { pwm, config }
    }
}

impl ToneOutput for Buzzer {
    fn set_tone(&mut self, freq_hz: u32) {
        let top = (PWM_COUNTER_HZ / freq_hz.max(1)).min(u32::from(u16::MAX)) as u16;
        // 50% duty for a plain square wave
        self.config.top = top;
        self.config.compare_b = top / 2;
        self.pwm.set_config(&self.config);
    }

    fn stop(&mut self) {
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
    }
}

/// Annunciator task
#[embassy_executor::task]
pub async fn annunciate(r: BuzzerResources) {
    let mut buzzer = Buzzer::new(r);
    buzzer.stop();

    info!("Annunciator started");

    loop {
        match play_pending(&SYSTEM_STATE, &mut buzzer, Timer::after).await {
            Some(alert) => info!(
                "Played {} alert ({} ms)",
                alert,
                alert.duration().as_millis()
            ),
            None => Timer::after(ANNUNCIATOR_IDLE_POLL).await,
        }
    }
}
