//! Annunciator patterns
//!
//! Each notification flag maps to a fixed, time-boxed buzzer pattern. The
//! firmware task plays a pattern step by step and only then acknowledges the
//! alert, so a flag raised again during playback is absorbed into the same
//! alert instead of queueing a second one.

use core::future::Future;

use defmt::Format;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use crate::config::{CAPACITY_TONE, CAPACITY_TONE_HZ, RESET_BEEP, RESET_GAP, RESET_TONE_HZ};
use crate::occupancy::SharedOccupancy;

/// Audible notifications, in playback priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Alert {
    /// An entry was rejected because the room is full
    CapacityReached,
    /// The counter was reset
    ResetOccurred,
}

/// One step of a buzzer pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum ToneStep {
    Tone { freq_hz: u32, duration: Duration },
    Silence(Duration),
}

/// Variable frequency tone output
pub trait ToneOutput {
    fn set_tone(&mut self, freq_hz: u32);
    fn stop(&mut self);
}

const CAPACITY_PATTERN: &[ToneStep] = &[ToneStep::Tone {
    freq_hz: CAPACITY_TONE_HZ,
    duration: CAPACITY_TONE,
}];

const RESET_PATTERN: &[ToneStep] = &[
    ToneStep::Tone {
        freq_hz: RESET_TONE_HZ,
        duration: RESET_BEEP,
    },
    ToneStep::Silence(RESET_GAP),
    ToneStep::Tone {
        freq_hz: RESET_TONE_HZ,
        duration: RESET_BEEP,
    },
];

impl Alert {
    pub fn pattern(self) -> &'static [ToneStep] {
        match self {
            Alert::CapacityReached => CAPACITY_PATTERN,
            Alert::ResetOccurred => RESET_PATTERN,
        }
    }

    /// Total playback time, tone steps included
    pub fn duration(self) -> Duration {
        self.pattern()
            .iter()
            .fold(Duration::from_ticks(0), |total, step| total + step.duration())
    }
}

impl ToneStep {
    pub fn duration(&self) -> Duration {
        match *self {
            ToneStep::Tone { duration, .. } => duration,
            ToneStep::Silence(duration) => duration,
        }
    }

    /// Applies the output side of the step. The caller waits `duration()`
    /// afterwards.
    pub fn start<T: ToneOutput>(&self, output: &mut T) {
        match *self {
            ToneStep::Tone { freq_hz, .. } => output.set_tone(freq_hz),
            ToneStep::Silence(_) => output.stop(),
        }
    }
}

/// One annunciator cycle: plays the highest priority pending alert, silences
/// the output and only then clears the flag. Returns `None` without touching
/// the output when nothing is pending.
///
/// The lock is only held to read and to clear the flags, never across
/// `delay`.
pub async fn annunciate<M, T, F>(
    state: &SharedOccupancy<M>,
    output: &mut T,
    mut delay: impl FnMut(Duration) -> F,
) -> Option<Alert>
where
    M: RawMutex,
    T: ToneOutput,
    F: Future<Output = ()>,
{
    let alert = state.lock().await.pending_alert()?;

    for step in alert.pattern() {
        step.start(output);
        delay(step.duration()).await;
    }
    output.stop();

    state.lock().await.acknowledge(alert);
    Some(alert)
}
