//! Button edge handling
//!
//! Stands in for the GPIO interrupt handler: runs on the highest priority
//! interrupt executor, timestamps each falling edge and passes it through the
//! debounce gate into the matching signal. Nothing here blocks on a lock a
//! consumer could hold.

use crate::system::event;
use crate::system::resources::ButtonResources;
use defmt::{debug, info, warn};
use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::{Input, Pull};
use occupancy_core::{Dispatch, Input as Button};

/// Edge dispatch task
#[embassy_executor::task]
pub async fn button_edges(r: ButtonResources) {
    let mut entry = Input::new(r.entry, Pull::Up);
    let mut exit = Input::new(r.exit, Pull::Up);
    let mut reset = Input::new(r.reset, Pull::Up);

    info!(
        "Button edge task started, debounce window {} ms",
        event::debounce_window().as_millis()
    );

    loop {
        let button = match select3(
            entry.wait_for_falling_edge(),
            exit.wait_for_falling_edge(),
            reset.wait_for_falling_edge(),
        )
        .await
        {
            Either3::First(()) => Button::Entry,
            Either3::Second(()) => Button::Exit,
            Either3::Third(()) => Button::Reset,
        };

        match event::dispatch(button) {
            Dispatch::Posted => debug!("{} edge accepted", button),
            // bounce, dropped without a trace
            Dispatch::Debounced => {}
            Dispatch::Dropped(e) => warn!("{} edge dropped: {}", button, e),
        }
    }
}
