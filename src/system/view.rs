//! Display view queue
//!
//! In-order hand-off of the views to show from the consumers to the display
//! task. Every queued view is rendered; a consumer waits while the queue is
//! full, which only happens when the display falls several views behind.
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::TrySendError;
use occupancy_core::{View, ViewQueue};

/// Views the display task still has to render
pub static VIEW: ViewQueue<CriticalSectionRawMutex> = ViewQueue::new();

/// Queues a view from outside a consumer. Fails when the queue is full.
pub fn show(view: View) -> Result<(), TrySendError<View>> {
    VIEW.try_send(view)
}

/// Waits for the next view to render
pub async fn next() -> View {
    VIEW.receive().await
}
