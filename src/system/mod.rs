//! Shared system state, signalling and hardware resource assignment
pub mod event;
pub mod resources;
pub mod state;
pub mod view;
