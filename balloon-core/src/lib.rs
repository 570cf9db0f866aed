// lib.rs
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod macros;

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod hooks;
pub mod log;
pub mod phase_table;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod testing;

pub use classifier::classify;
pub use config::*;
pub use dispatcher::*;
pub use hooks::*;
pub use phase_table::{PhaseDescriptor, PhaseTable};
pub use telemetry::frame::{decode_frame, validate_checksum};
pub use telemetry::*;
pub use types::*;
