//! Server binary support library
//!
//! Exposes the configuration, telemetry and setup modules so integration
//! tests can drive the same wiring as the `taskdeck` binary.

pub mod config;
pub mod setup;
pub mod telemetry;
