//! Absolute Maximum Ratings
//!
//! The electrical limits were never filled in on the board and ship as zero.
//! They are kept at zero here so that an unconfigured board fails
//! [`crate::config::BoardConfig::validate`] instead of silently accepting or
//! rejecting every reading.

/// Maximum pack current magnitude (A). Unset.
pub const CURRENT_LIMIT: f32 = 0.0;

/// Maximum module voltage (V). Unset.
pub const HIGH_VOLTAGE_LIMIT: f32 = 0.0;

/// Minimum module voltage (V). Unset.
pub const LOW_VOLTAGE_LIMIT: f32 = 0.0;

/// Maximum temperature (°C). Unset.
pub const TEMP_LIMIT: f32 = 0.0;

/// No data can be older than this (ms).
///
/// The BMS broadcasts every frame several times a second, so ten seconds of
/// silence means the bus or the BMS is gone.
pub const AGE_LIMIT_MS: u64 = 10_000;
