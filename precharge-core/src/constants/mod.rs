//! Board Constants
//!
//! The precharge board's header values, kept in one place with their units
//! and the reason each exists. Components never read these directly: they are
//! the defaults behind [`crate::config::BoardConfig`], which is what gets
//! passed around.
//!
//! ## Organization
//!
//! - **CAN**: bus speed, identifier mask, base addresses and frame offsets
//! - **Pins**: relay, LED, switch and fan pin assignments (two board revisions)
//! - **Limits**: absolute maximum ratings and the data age limit
//! - **Buffers**: per-channel history depth, outlier tolerance, channel count

/// CAN bus parameters and frame identifiers.
pub mod can;

/// Pin assignments for both board revisions.
pub mod pins;

/// Absolute maximum ratings and data age limit.
pub mod limits;

/// History depth, outlier tolerance and store sizing.
pub mod buffers;

pub use can::{CAN_BAUD, CAN_MASK, BMS_CAN_BASE, BPS_CAN_BASE};
pub use limits::AGE_LIMIT_MS;
pub use buffers::{DATA_POINTS_TO_STORE, MAX_ACCEPTABLE_BAD_VALUES, MAX_CHANNELS};
