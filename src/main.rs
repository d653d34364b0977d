//! Occupancy counter firmware entry point
//!
//! Brings up the board, shows the boot screen and spawns the tasks on three
//! priority levels:
//! - button edges: highest interrupt executor, stands in for the GPIO ISR
//! - reset consumer: lower interrupt executor, preempts everything in thread mode
//! - entry, exit, indicator, annunciator and display: thread mode, equal priority

#![no_std]
#![no_main]

use crate::task::{
    annunciate::annunciate,
    button_edges::button_edges,
    consume::{admit_user, remove_user, reset_counter},
    display::display,
    rgb_led_indicate::rgb_led_indicate,
};
use defmt::{info, warn};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::config::Config;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use occupancy_core::config::CAPACITY;
use occupancy_core::View;
use system::resources::{
    AssignedResources, BuzzerResources, ButtonResources, DisplayResources, RgbLedResources,
};
use {defmt_rtt as _, panic_probe as _};

/// System core modules
mod system;
/// Task implementations
mod task;

/// Executor for the button edge task
static EXECUTOR_EDGES: InterruptExecutor = InterruptExecutor::new();

/// Executor for the reset consumer
static EXECUTOR_RESET: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_EDGES.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_RESET.on_interrupt()
}

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each task
    let r = split_resources!(p);

    info!("Occupancy counter starting, capacity {}", CAPACITY);

    // The display is the only peripheral that can fail to come up. This must
    // happen before any task is spawned so a failure halts startup.
    let panel = task::display::init(r.display);
    if system::view::show(View::Startup).is_err() {
        warn!("View queue full, startup view dropped");
    }

    // Lower number is higher priority; both levels preempt thread mode
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let edge_spawner = EXECUTOR_EDGES.start(interrupt::SWI_IRQ_1);
    interrupt::SWI_IRQ_0.set_priority(Priority::P3);
    let reset_spawner = EXECUTOR_RESET.start(interrupt::SWI_IRQ_0);

    // Consumers first, so no accepted edge waits on an unspawned task
    reset_spawner.spawn(reset_counter()).unwrap();
    spawner.spawn(admit_user()).unwrap();
    spawner.spawn(remove_user()).unwrap();
    spawner.spawn(display(panel)).unwrap();
    spawner.spawn(rgb_led_indicate(r.rgb_led)).unwrap();
    spawner.spawn(annunciate(r.buzzer)).unwrap();
    edge_spawner.spawn(button_edges(r.buttons)).unwrap();

    info!("All tasks spawned");
}
