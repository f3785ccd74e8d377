//! Reading Validators
//!
//! ## Overview
//!
//! The store does not know what a good reading looks like. Each health query
//! takes a validator, the validity rule for that measurement kind, and counts
//! how many stored readings fail it. Rejection policy stays with the caller;
//! the store only counts.
//!
//! ## Validity Rules
//!
//! Rules come from the board's absolute maximum ratings:
//!
//! | Kind            | Rule                                           |
//! |-----------------|------------------------------------------------|
//! | Module voltage  | `LOW_VOLTAGE_LIMIT <= v <= HIGH_VOLTAGE_LIMIT` |
//! | Pack voltage    | `v >= 0`                                       |
//! | Pack current    | `-CURRENT_LIMIT <= i <= CURRENT_LIMIT`         |
//! | State of charge | `0 <= soc <= 100`                              |
//! | Temperature     | `t <= TEMP_LIMIT`                              |
//!
//! NaN and infinite values fail every rule: a corrupted frame must count as
//! bad, not slip through a comparison that is always false.
//!
//! ## Usage Example
//!
//! ```rust
//! use precharge_core::{ChannelId, Reading, Validator, RangeValidator, KindValidator};
//! use precharge_core::config::Limits;
//!
//! let cell = RangeValidator::new(2.8, 4.2);
//! assert!(cell.is_valid(&Reading::new(ChannelId::module_voltage(0), 3.7, 0)));
//!
//! // Any closure works too
//! let positive = |r: &Reading| r.value() > 0.0;
//! assert!(!positive.is_valid(&Reading::new(ChannelId::PACK_CURRENT, -4.0, 0)));
//!
//! // One validator for every kind
//! let all = KindValidator::from_limits(&Limits::new(100.0, 4.2, 2.8, 60.0));
//! assert!(!all.is_valid(&Reading::new(ChannelId::temperature(1), 75.0, 0)));
//! ```

mod kind;
mod range;

pub use kind::KindValidator;
pub use range::RangeValidator;

use crate::reading::Reading;

/// Validity rule applied to stored readings
pub trait Validator {
    /// True if the reading is plausible
    fn is_valid(&self, reading: &Reading) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&Reading) -> bool,
{
    fn is_valid(&self, reading: &Reading) -> bool {
        self(reading)
    }
}
