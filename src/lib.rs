//! Ensure IOS-XR Loopback interfaces exist, set their descriptions, and
//! generate a rollback that truly reverts the device.
//!
//! The rollback engine lives in [`device`] (identifier normalization,
//! per-interface probes, emptiness classification) and [`executor`]
//! (change planning, rollback synthesis, and the device session
//! capability). [`commands`] wires them into the CLI workflows.

pub mod backup;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod device;
pub mod diff;
pub mod error;
pub mod executor;
pub mod logging;
pub mod ui;

pub use error::{Result, XrError};
