//! Entry, exit and reset consumers
//!
//! One task per signal. Each waits for its signal, applies the bounded
//! transition under the state lock, then holds its view for the role's dwell
//! period outside the lock. The reset consumer is spawned on its own
//! interrupt executor so it preempts the other two.

use crate::system::state::SYSTEM_STATE;
use crate::system::{event, view};
use defmt::{info, warn};
use embassy_time::Timer;
use occupancy_core::{Admission, Consumer, Departure, Outcome, Role};

/// Entry consumer
#[embassy_executor::task]
pub async fn admit_user() {
    consume(Role::Entry).await;
}

/// Exit consumer
#[embassy_executor::task]
pub async fn remove_user() {
    consume(Role::Exit).await;
}

/// Reset consumer
#[embassy_executor::task]
pub async fn reset_counter() {
    consume(Role::Reset).await;
}

/// Runs one consumer forever
async fn consume(role: Role) -> ! {
    let mut consumer = Consumer::new(role, &SYSTEM_STATE, &view::VIEW);
    info!("{} consumer started", role);

    loop {
        let outcome = consumer.next(event::signals()).await;
        report(outcome);

        Timer::after(role.dwell()).await;
        consumer.settle().await;
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Entered(Admission::Admitted { count, vacancies }) => {
            info!("User admitted, {} present, {} vacancies", count, vacancies)
        }
        Outcome::Entered(Admission::Full { count }) => {
            warn!("Entry rejected, capacity of {} reached", count)
        }
        Outcome::Exited(Departure::Removed { count, vacancies }) => {
            info!("User removed, {} present, {} vacancies", count, vacancies)
        }
        Outcome::Exited(Departure::NothingToRemove) => info!("Exit ignored, nobody present"),
        Outcome::Reset { previous } => info!("Counter reset from {}", previous),
    }
}
