//! Readings and Channel Identifiers
//!
//! A channel is one physical measurement stream, named by what it measures
//! and, for per-module and per-thermistor streams, which source produced it:
//!
//! ```text
//! ChannelId { kind: PackCurrent,   source: 0 }   pack-level, no source
//! ChannelId { kind: ModuleVoltage, source: 3 }   module 3
//! ChannelId { kind: Temperature,   source: 7 }   thermistor 7
//! ```
//!
//! A [`Reading`] is immutable once built: the store hands out copies, never
//! mutable access.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Module id or thermistor id
pub type SourceId = u8;

/// What a channel measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MeasurementKind {
    /// Pack current, positive when discharging
    PackCurrent = 0,
    /// Total pack voltage
    PackVoltage = 1,
    /// Pack state of charge
    StateOfCharge = 2,
    /// One module's voltage
    ModuleVoltage = 3,
    /// One thermistor's temperature
    Temperature = 4,
}

impl MeasurementKind {
    /// Name used in logs
    pub const fn name(&self) -> &'static str {
        match self {
            MeasurementKind::PackCurrent => "pack_current",
            MeasurementKind::PackVoltage => "pack_voltage",
            MeasurementKind::StateOfCharge => "state_of_charge",
            MeasurementKind::ModuleVoltage => "module_voltage",
            MeasurementKind::Temperature => "temperature",
        }
    }

    /// Unit every reading of this kind is expressed in
    pub const fn unit(&self) -> Unit {
        match self {
            MeasurementKind::PackCurrent => Unit::Amps,
            MeasurementKind::PackVoltage | MeasurementKind::ModuleVoltage => Unit::Volts,
            MeasurementKind::StateOfCharge => Unit::Percent,
            MeasurementKind::Temperature => Unit::Celsius,
        }
    }

    /// Pack-level kinds have a single stream and no source id
    pub const fn is_pack_level(&self) -> bool {
        matches!(
            self,
            MeasurementKind::PackCurrent
                | MeasurementKind::PackVoltage
                | MeasurementKind::StateOfCharge
        )
    }
}

/// Unit tag carried by every reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    /// Amperes
    Amps,
    /// Volts
    Volts,
    /// Percent of full charge
    Percent,
    /// Degrees Celsius
    Celsius,
}

impl Unit {
    /// Display symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::Amps => "A",
            Unit::Volts => "V",
            Unit::Percent => "%",
            Unit::Celsius => "°C",
        }
    }
}

/// Identifies one measurement stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId {
    kind: MeasurementKind,
    source: SourceId,
}

impl ChannelId {
    /// Pack current
    pub const PACK_CURRENT: Self = Self::pack(MeasurementKind::PackCurrent);

    /// Pack voltage
    pub const PACK_VOLTAGE: Self = Self::pack(MeasurementKind::PackVoltage);

    /// Pack state of charge
    pub const STATE_OF_CHARGE: Self = Self::pack(MeasurementKind::StateOfCharge);

    /// Build an id from parts.
    ///
    /// The source of a pack-level kind is forced to 0 so the same stream can
    /// never be split across two ids.
    pub const fn new(kind: MeasurementKind, source: SourceId) -> Self {
        let source = if kind.is_pack_level() { 0 } else { source };
        Self { kind, source }
    }

    const fn pack(kind: MeasurementKind) -> Self {
        Self { kind, source: 0 }
    }

    /// Voltage of one module
    pub const fn module_voltage(module: SourceId) -> Self {
        Self::new(MeasurementKind::ModuleVoltage, module)
    }

    /// Temperature of one thermistor
    pub const fn temperature(thermistor: SourceId) -> Self {
        Self::new(MeasurementKind::Temperature, thermistor)
    }

    /// What the channel measures
    pub const fn kind(&self) -> MeasurementKind {
        self.kind
    }

    /// Module or thermistor id, `None` for pack-level channels
    pub const fn source(&self) -> Option<SourceId> {
        if self.kind.is_pack_level() {
            None
        } else {
            Some(self.source)
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source() {
            Some(source) => write!(f, "{}[{}]", self.kind.name(), source),
            None => f.write_str(self.kind.name()),
        }
    }
}

/// One recorded measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    channel: ChannelId,
    value: f32,
    timestamp: Timestamp,
}

impl Reading {
    /// Build a reading for `channel`. The value is kept as-is, even if it is
    /// NaN or a sentinel; judging it is the validator's job.
    pub const fn new(channel: ChannelId, value: f32, timestamp: Timestamp) -> Self {
        Self { channel, value, timestamp }
    }

    /// Channel the reading belongs to
    pub const fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Measurement kind
    pub const fn kind(&self) -> MeasurementKind {
        self.channel.kind()
    }

    /// Module or thermistor id, if any
    pub const fn source(&self) -> Option<SourceId> {
        self.channel.source()
    }

    /// Measured value in [`Reading::unit`]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Unit of the value
    pub const fn unit(&self) -> Unit {
        self.channel.kind().unit()
    }

    /// Milliseconds since boot when the reading was taken
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_channels_ignore_source() {
        let a = ChannelId::new(MeasurementKind::PackVoltage, 9);
        assert_eq!(a, ChannelId::PACK_VOLTAGE);
        assert_eq!(a.source(), None);
    }

    #[test]
    fn module_channels_keep_source() {
        let id = ChannelId::module_voltage(3);
        assert_eq!(id.kind(), MeasurementKind::ModuleVoltage);
        assert_eq!(id.source(), Some(3));
        assert_ne!(id, ChannelId::module_voltage(4));
        assert_ne!(id, ChannelId::temperature(3));
    }

    #[test]
    fn readings_are_unit_tagged() {
        let reading = Reading::new(ChannelId::temperature(2), 31.5, 1200);
        assert_eq!(reading.unit(), Unit::Celsius);
        assert_eq!(reading.source(), Some(2));
        assert_eq!(reading.timestamp(), 1200);

        let soc = Reading::new(ChannelId::STATE_OF_CHARGE, 87.0, 0);
        assert_eq!(soc.unit().symbol(), "%");
        assert_eq!(soc.source(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_names() {
        assert_eq!(ChannelId::PACK_CURRENT.to_string(), "pack_current");
        assert_eq!(ChannelId::temperature(12).to_string(), "temperature[12]");
    }
}
