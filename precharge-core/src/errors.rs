//! Error Types for Store Queries and Board Configuration
//!
//! ## Design Philosophy
//!
//! Nothing in the store is allowed to take the control loop down. A missing,
//! stale or noisy channel is an ordinary answer to a query, not a failure, so
//! the store never panics and `record` never returns an error at all.
//!
//! The error types follow the same rules as the rest of the crate:
//!
//! 1. **No Heap Allocation**: only inline data and `&'static str`.
//! 2. **Copy Semantics**: errors are returned from the control loop's hot path
//!    and are cheap to pass around.
//! 3. **Actionable Information**: each variant carries what the control loop
//!    needs to decide whether to open a relay, without another query.
//!
//! ## Store Errors
//!
//! - `ChannelEmpty`: nothing ever recorded (or the channel was reset).
//!   Informational, expected right after boot.
//! - `Stale`: the latest reading is older than the age limit. The channel must
//!   not be trusted.
//! - `Unhealthy`: too many stored readings fail the validity rule. Points at a
//!   sensor or wiring fault.
//!
//! ```rust
//! use precharge_core::{ChannelId, SampleStore, StoreError, RangeValidator};
//!
//! let store: SampleStore = SampleStore::default();
//! let volts = RangeValidator::new(2.5, 4.2);
//!
//! match store.check(ChannelId::module_voltage(3), 0, &volts) {
//!     Ok(reading) => { let _ = reading.value(); }
//!     Err(StoreError::ChannelEmpty) => { /* not heard from yet */ }
//!     Err(StoreError::Stale { .. }) => { /* open RELAY2_HIGH_SIDE */ }
//!     Err(StoreError::Unhealthy { .. }) => { /* raise VEHICLE_FAULT */ }
//! }
//! ```

use thiserror_no_std::Error;

use crate::time::Timestamp;

/// Result type for store queries
pub type StoreResult<T> = Result<T, StoreError>;

/// Why a channel cannot be trusted right now
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No reading has been recorded on the channel
    #[error("No reading recorded on channel")]
    ChannelEmpty,

    /// Latest reading is older than the age limit
    #[error("Latest reading is {age_ms}ms old, limit is {limit_ms}ms")]
    Stale {
        /// Age of the latest reading at query time
        age_ms: Timestamp,
        /// Configured age limit
        limit_ms: Timestamp,
    },

    /// Too many stored readings failed the validity rule
    #[error("{bad} stored readings out of range, at most {tolerated} tolerated")]
    Unhealthy {
        /// Stored readings that failed the validator
        bad: usize,
        /// Configured tolerance
        tolerated: usize,
    },
}

/// Board configuration rejected by validation
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A limit was left at its placeholder value
    #[error("Limit {name} is unset")]
    LimitUnset {
        /// Header name of the limit
        name: &'static str,
    },

    /// Low voltage limit is not below the high voltage limit
    #[error("Voltage window inverted: low {low}V >= high {high}V")]
    VoltageWindowInverted {
        /// Configured low voltage limit
        low: f32,
        /// Configured high voltage limit
        high: f32,
    },

    /// An age limit of zero makes every reading stale on arrival
    #[error("Age limit must be non-zero")]
    ZeroAgeLimit,

    /// Tolerance so large that no channel could ever be declared unhealthy
    #[error("Tolerating {max_bad_values} bad readings out of {capacity} disables the health check")]
    ToleranceTooLoose {
        /// Configured tolerance
        max_bad_values: usize,
        /// Readings retained per channel
        capacity: usize,
    },

    /// One pin assigned to two functions
    #[error("Pin {pin} assigned to both {first} and {second}")]
    PinConflict {
        /// The pin number
        pin: u8,
        /// First function using the pin
        first: &'static str,
        /// Second function using the pin
        second: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for StoreError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ChannelEmpty =>
                defmt::write!(fmt, "Channel empty"),
            Self::Stale { age_ms, limit_ms } =>
                defmt::write!(fmt, "Stale: {}ms old, limit {}ms", age_ms, limit_ms),
            Self::Unhealthy { bad, tolerated } =>
                defmt::write!(fmt, "Unhealthy: {} bad, {} tolerated", bad, tolerated),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::LimitUnset { name } =>
                defmt::write!(fmt, "Limit {} unset", name),
            Self::VoltageWindowInverted { low, high } =>
                defmt::write!(fmt, "Voltage window inverted: {} >= {}", low, high),
            Self::ZeroAgeLimit =>
                defmt::write!(fmt, "Zero age limit"),
            Self::ToleranceTooLoose { max_bad_values, capacity } =>
                defmt::write!(fmt, "Tolerance {} of {} disables health check", max_bad_values, capacity),
            Self::PinConflict { pin, first, second } =>
                defmt::write!(fmt, "Pin {} used by {} and {}", pin, first, second),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn stale_message_carries_ages() {
        let err = StoreError::Stale { age_ms: 12_000, limit_ms: 10_000 };
        assert_eq!(err.to_string(), "Latest reading is 12000ms old, limit is 10000ms");
    }

    #[test]
    fn pin_conflict_names_both_functions() {
        let err = ConfigError::PinConflict {
            pin: 50,
            first: "FAN_CONTROL_PIN",
            second: "RELAY4_MPPT",
        };
        assert_eq!(err.to_string(), "Pin 50 assigned to both FAN_CONTROL_PIN and RELAY4_MPPT");
    }
}
