//! Pack Snapshot
//!
//! The BMS reports pack current, voltage and state of charge on one frame and
//! the highest/lowest module voltage and temperature on others. The control
//! loop usually wants all of that at once, taken from the same instant, so
//! [`PackSnapshot::capture`] reads the store in one pass.
//!
//! Only fresh readings make it into a snapshot. A stale or missing channel
//! shows up as `None`, never as its last known value.
//!
//! ```rust
//! use precharge_core::{ChannelId, PackSnapshot, SampleStore};
//!
//! let mut store: SampleStore = SampleStore::default();
//! store.record(ChannelId::PACK_VOLTAGE, 113.2, 0);
//! store.record(ChannelId::module_voltage(0), 3.71, 0);
//! store.record(ChannelId::module_voltage(1), 3.64, 0);
//!
//! let snapshot = PackSnapshot::capture(&store, 500);
//! assert_eq!(snapshot.pack.voltage, Some(113.2));
//! assert_eq!(snapshot.pack.current, None);
//!
//! let cells = snapshot.voltages.unwrap();
//! assert_eq!((cells.high_id, cells.low_id), (0, 1));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::reading::{ChannelId, MeasurementKind, Reading, SourceId};
use crate::store::SampleStore;
use crate::time::{age_ms, TimeSource, Timestamp};

/// Pack-level values
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackStatus {
    /// Amps, positive when discharging
    pub current: Option<f32>,
    /// Volts
    pub voltage: Option<f32>,
    /// Percent
    pub soc: Option<f32>,
}

/// Highest and lowest value across the sources of one kind
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Extremes {
    /// Highest value
    pub high: f32,
    /// Source reporting `high`
    pub high_id: SourceId,
    /// Lowest value
    pub low: f32,
    /// Source reporting `low`
    pub low_id: SourceId,
}

/// Module voltage extremes
pub type VoltageExtremes = Extremes;

/// Thermistor extremes
pub type TemperatureExtremes = Extremes;

impl Extremes {
    const fn single(value: f32, id: SourceId) -> Self {
        Self {
            high: value,
            high_id: id,
            low: value,
            low_id: id,
        }
    }

    /// Ties keep the lower source id
    fn include(&mut self, value: f32, id: SourceId) {
        if value > self.high || (value == self.high && id < self.high_id) {
            self.high = value;
            self.high_id = id;
        }
        if value < self.low || (value == self.low && id < self.low_id) {
            self.low = value;
            self.low_id = id;
        }
    }

    /// `high - low`
    pub fn spread(&self) -> f32 {
        self.high - self.low
    }
}

/// Fresh pack state at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackSnapshot {
    /// When the snapshot was taken
    pub taken_at: Timestamp,
    /// Current, voltage and state of charge
    pub pack: PackStatus,
    /// Module voltage extremes, `None` if no module is fresh
    pub voltages: Option<VoltageExtremes>,
    /// Temperature extremes, `None` if no thermistor is fresh
    pub temperatures: Option<TemperatureExtremes>,
}

impl PackSnapshot {
    /// Build a snapshot from the latest fresh readings in `store`.
    ///
    /// Non-finite values are skipped.
    pub fn capture<const N: usize, const C: usize>(store: &SampleStore<N, C>, now: Timestamp) -> Self {
        let limit = store.policy().age_limit_ms;
        let fresh = |reading: &Reading| {
            age_ms(now, reading.timestamp()) <= limit && reading.value().is_finite()
        };
        let pack_value = |id: ChannelId| store.latest(id).ok().filter(fresh).map(|r| r.value());

        let mut voltages: Option<Extremes> = None;
        let mut temperatures: Option<Extremes> = None;

        for channel in store.iter() {
            let Some(reading) = channel.latest().filter(fresh) else {
                continue;
            };
            let Some(source) = reading.source() else {
                continue;
            };
            let slot = match reading.kind() {
                MeasurementKind::ModuleVoltage => &mut voltages,
                MeasurementKind::Temperature => &mut temperatures,
                _ => continue,
            };
            match slot {
                Some(extremes) => extremes.include(reading.value(), source),
                None => *slot = Some(Extremes::single(reading.value(), source)),
            }
        }

        Self {
            taken_at: now,
            pack: PackStatus {
                current: pack_value(ChannelId::PACK_CURRENT),
                voltage: pack_value(ChannelId::PACK_VOLTAGE),
                soc: pack_value(ChannelId::STATE_OF_CHARGE),
            },
            voltages,
            temperatures,
        }
    }

    /// [`PackSnapshot::capture`] at the time reported by `clock`
    pub fn capture_now<const N: usize, const C: usize, T>(store: &SampleStore<N, C>, clock: &T) -> Self
    where
        T: TimeSource + ?Sized,
    {
        Self::capture(store, clock.now())
    }

    /// Difference between the highest and lowest module voltage
    pub fn voltage_spread(&self) -> Option<f32> {
        self.voltages.as_ref().map(Extremes::spread)
    }

    /// True when every pack-level value and both extremes are present
    pub fn is_complete(&self) -> bool {
        self.pack.current.is_some()
            && self.pack.voltage.is_some()
            && self.pack.soc.is_some()
            && self.voltages.is_some()
            && self.temperatures.is_some()
    }
}
