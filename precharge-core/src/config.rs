//! Board Configuration
//!
//! The header constants as one immutable value handed to whatever needs them,
//! instead of free-floating globals. That keeps the store testable on a host
//! with made-up limits, and lets one binary serve both board revisions.
//!
//! ```rust
//! use precharge_core::config::{BoardConfig, Limits, PinConfig};
//!
//! let config = BoardConfig::new()
//!     .with_pins(PinConfig::REV_B)
//!     .with_limits(Limits::new(120.0, 4.2, 2.8, 60.0));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.can.pack_status_id(), 0x6B0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{buffers, can, limits, pins};
use crate::errors::ConfigError;
use crate::time::Timestamp;

/// Everything the board needs to know about itself
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// CAN bus parameters
    pub can: CanConfig,
    /// Pin map
    pub pins: PinConfig,
    /// Absolute maximum ratings
    pub limits: Limits,
    /// Staleness and outlier policy for the sample store
    pub store: StorePolicy,
}

impl BoardConfig {
    /// Header defaults: revision A pins, unset limits
    pub const fn new() -> Self {
        Self {
            can: CanConfig::DEFAULT,
            pins: PinConfig::REV_A,
            limits: Limits::UNSET,
            store: StorePolicy::DEFAULT,
        }
    }

    /// Replace the CAN parameters
    pub const fn with_can(mut self, can: CanConfig) -> Self {
        self.can = can;
        self
    }

    /// Replace the pin map
    pub const fn with_pins(mut self, pins: PinConfig) -> Self {
        self.pins = pins;
        self
    }

    /// Replace the electrical limits
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the store policy
    pub const fn with_store(mut self, store: StorePolicy) -> Self {
        self.store = store;
        self
    }

    /// Check the configuration is usable, reporting the first problem found.
    ///
    /// The store policy is checked against [`buffers::DATA_POINTS_TO_STORE`];
    /// stores built with another depth check themselves in
    /// [`crate::store::SampleStore::try_new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()?;
        self.pins.validate()?;
        self.store.validate(buffers::DATA_POINTS_TO_STORE)?;
        Ok(())
    }
}

/// Frames the BMS sends that this board listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BmsFrame {
    /// Pack current, voltage and state of charge
    PackStatus,
    /// Module voltage extremes
    HiLoVolts,
    /// Temperatures and trouble codes
    TempDtc,
}

/// CAN bus parameters and frame identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanConfig {
    /// Bus speed in bit/s
    pub baud: u32,
    /// Identifier mask
    pub id_mask: u16,
    /// Base of frames sent by the BMS
    pub bms_base: u16,
    /// Base of frames sent by this board
    pub bps_base: u16,
    /// Offset of the pack status frame
    pub pack_status: u16,
    /// Offset of the module voltage extremes frame
    pub hilo_volts: u16,
    /// Offset of the temperature / DTC frame
    pub temp_dtc: u16,
    /// Offset of the vehicle fault frame
    pub vehicle_fault: u16,
}

impl CanConfig {
    /// Header values
    pub const DEFAULT: Self = Self {
        baud: can::CAN_BAUD,
        id_mask: can::CAN_MASK,
        bms_base: can::BMS_CAN_BASE,
        bps_base: can::BPS_CAN_BASE,
        pack_status: can::PACK_STATUS,
        hilo_volts: can::HILO_VOLTS,
        temp_dtc: can::TEMP_DTC,
        vehicle_fault: can::VEHICLE_FAULT,
    };

    const fn frame_id(&self, base: u16, offset: u16) -> u16 {
        base.wrapping_add(offset) & self.id_mask
    }

    /// Full identifier of the pack status frame
    pub const fn pack_status_id(&self) -> u16 {
        self.frame_id(self.bms_base, self.pack_status)
    }

    /// Full identifier of the module voltage extremes frame
    pub const fn hilo_volts_id(&self) -> u16 {
        self.frame_id(self.bms_base, self.hilo_volts)
    }

    /// Full identifier of the temperature / DTC frame
    pub const fn temp_dtc_id(&self) -> u16 {
        self.frame_id(self.bms_base, self.temp_dtc)
    }

    /// Full identifier of the fault frame this board sends
    pub const fn vehicle_fault_id(&self) -> u16 {
        self.frame_id(self.bps_base, self.vehicle_fault)
    }

    /// Which BMS frame an incoming identifier is, if any
    pub fn classify(&self, id: u16) -> Option<BmsFrame> {
        let id = id & self.id_mask;
        if id == self.pack_status_id() {
            Some(BmsFrame::PackStatus)
        } else if id == self.hilo_volts_id() {
            Some(BmsFrame::HiLoVolts)
        } else if id == self.temp_dtc_id() {
            Some(BmsFrame::TempDtc)
        } else {
            None
        }
    }
}

impl Default for CanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pin assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Precharge request switch input
    pub precharge_switch: u8,
    /// Precharge status LED
    pub precharge_led: u8,
    /// Fan enable
    pub fan_control: u8,
    /// Low side contactor
    pub relay1_low_side: u8,
    /// High side contactor
    pub relay2_high_side: u8,
    /// Precharge resistor relay
    pub relay3_precharge: u8,
    /// Solar MPPT relay
    pub relay4_mppt: u8,
}

impl PinConfig {
    /// First board revision
    pub const REV_A: Self = Self {
        precharge_switch: pins::PRECHARGE_SWITCH,
        precharge_led: pins::PRECHARGE_LED,
        fan_control: pins::FAN_CONTROL_PIN,
        relay1_low_side: pins::RELAY1_LOW_SIDE,
        relay2_high_side: pins::RELAY2_HIGH_SIDE,
        relay3_precharge: pins::RELAY3_PRECHARGE,
        relay4_mppt: pins::RELAY4_MPPT,
    };

    /// Second board revision: LED and relays moved
    pub const REV_B: Self = Self {
        precharge_switch: pins::PRECHARGE_SWITCH,
        precharge_led: pins::REV_B_PRECHARGE_LED,
        fan_control: pins::FAN_CONTROL_PIN,
        relay1_low_side: pins::REV_B_RELAY1_LOW_SIDE,
        relay2_high_side: pins::REV_B_RELAY2_HIGH_SIDE,
        relay3_precharge: pins::REV_B_RELAY3_PRECHARGE,
        relay4_mppt: pins::REV_B_RELAY4_MPPT,
    };

    fn assignments(&self) -> [(&'static str, u8); 7] {
        [
            ("PRECHARGE_SWITCH", self.precharge_switch),
            ("PRECHARGE_LED", self.precharge_led),
            ("FAN_CONTROL_PIN", self.fan_control),
            ("RELAY1_LOW_SIDE", self.relay1_low_side),
            ("RELAY2_HIGH_SIDE", self.relay2_high_side),
            ("RELAY3_PRECHARGE", self.relay3_precharge),
            ("RELAY4_MPPT", self.relay4_mppt),
        ]
    }

    /// Reject a map that drives one pin from two functions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let assignments = self.assignments();
        for (i, &(first, pin)) in assignments.iter().enumerate() {
            if let Some(&(second, _)) = assignments[i + 1..].iter().find(|(_, p)| *p == pin) {
                return Err(ConfigError::PinConflict { pin, first, second });
            }
        }
        Ok(())
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self::REV_A
    }
}

/// Absolute maximum ratings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Limits {
    /// Maximum pack current magnitude (A)
    pub current_limit: f32,
    /// Maximum module voltage (V)
    pub high_voltage_limit: f32,
    /// Minimum module voltage (V)
    pub low_voltage_limit: f32,
    /// Maximum temperature (°C)
    pub temp_limit: f32,
}

impl Limits {
    /// Header placeholders, rejected by [`Limits::validate`]
    pub const UNSET: Self = Self {
        current_limit: limits::CURRENT_LIMIT,
        high_voltage_limit: limits::HIGH_VOLTAGE_LIMIT,
        low_voltage_limit: limits::LOW_VOLTAGE_LIMIT,
        temp_limit: limits::TEMP_LIMIT,
    };

    /// Build limits. The voltage window is normalized so `low <= high`.
    pub fn new(current: f32, high_voltage: f32, low_voltage: f32, temp: f32) -> Self {
        let (low, high) = if low_voltage > high_voltage {
            (high_voltage, low_voltage)
        } else {
            (low_voltage, high_voltage)
        };
        Self {
            current_limit: current,
            high_voltage_limit: high,
            low_voltage_limit: low,
            temp_limit: temp,
        }
    }

    /// Reject placeholder and nonsensical limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("CURRENT_LIMIT", self.current_limit),
            ("HIGH_VOLTAGE_LIMIT", self.high_voltage_limit),
            ("LOW_VOLTAGE_LIMIT", self.low_voltage_limit),
            ("TEMP_LIMIT", self.temp_limit),
        ];
        if let Some(&(name, _)) = named.iter().find(|(_, v)| *v == 0.0 || !v.is_finite()) {
            return Err(ConfigError::LimitUnset { name });
        }

        if self.low_voltage_limit >= self.high_voltage_limit {
            return Err(ConfigError::VoltageWindowInverted {
                low: self.low_voltage_limit,
                high: self.high_voltage_limit,
            });
        }

        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::UNSET
    }
}

/// Staleness and outlier tolerance for the sample store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StorePolicy {
    /// Readings older than this (ms) are stale
    pub age_limit_ms: Timestamp,
    /// Failing readings a channel may hold and stay healthy
    pub max_bad_values: usize,
}

impl StorePolicy {
    /// Header values
    pub const DEFAULT: Self = Self {
        age_limit_ms: limits::AGE_LIMIT_MS,
        max_bad_values: buffers::MAX_ACCEPTABLE_BAD_VALUES,
    };

    /// Build a policy
    pub const fn new(age_limit_ms: Timestamp, max_bad_values: usize) -> Self {
        Self { age_limit_ms, max_bad_values }
    }

    /// Check the policy makes sense for channels holding `capacity` readings
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.age_limit_ms == 0 {
            return Err(ConfigError::ZeroAgeLimit);
        }
        if self.max_bad_values >= capacity {
            return Err(ConfigError::ToleranceTooLoose {
                max_bad_values: self.max_bad_values,
                capacity,
            });
        }
        Ok(())
    }
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
