//! Sample store for the precharge board
//!
//! Keeps the last few readings of every BMS measurement stream (pack current,
//! pack voltage, state of charge, module voltages, temperatures) and tells the
//! control loop whether each stream is fresh and trustworthy before it acts
//! on it.
//!
//! Key constraints:
//! - No heap allocation; every buffer is sized at compile time
//! - Staleness is decided at query time from the caller's `now`
//! - Nothing fails hard: missing data answers "empty", never panics
//!
//! ```rust
//! use precharge_core::{ChannelId, SampleStore, RangeValidator};
//!
//! let mut store: SampleStore = SampleStore::default();
//! let cell = ChannelId::module_voltage(3);
//!
//! // CAN receive path
//! store.record(cell, 3.71, 1_000);
//!
//! // control loop
//! let volts = RangeValidator::new(2.8, 4.2);
//! if store.is_healthy(cell, 1_200, &volts) {
//!     // safe to close the precharge relay
//! }
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod buffer;
pub mod channel;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pack;
pub mod reading;
pub mod shared;
pub mod store;
pub mod time;
pub mod validators;

// Public API
pub use channel::{Channel, ChannelStatus};
pub use config::BoardConfig;
pub use errors::{ConfigError, StoreError, StoreResult};
pub use pack::PackSnapshot;
pub use reading::{ChannelId, MeasurementKind, Reading, SourceId, Unit};
pub use shared::SharedSampleStore;
pub use store::SampleStore;
pub use time::{TimeSource, Timestamp};
pub use validators::{KindValidator, RangeValidator, Validator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
