//! Shared fixtures for integration tests
//!
//! - A realistic board configuration with limits filled in
//! - Helpers that feed the store the way the CAN receive path does
//! - Canned pack scenarios

#![allow(dead_code)]

use precharge_core::{
    config::{BoardConfig, Limits, StorePolicy},
    ChannelId, KindValidator, SampleStore, SourceId, Timestamp,
};

pub mod scenarios;

/// Store sized like the firmware: 5 readings, 64 channels
pub type BoardStore = SampleStore;

/// Small store for table-full and eviction tests
pub type TinyStore = SampleStore<5, 4>;

/// Module count on the test pack
pub const MODULES: SourceId = 8;

/// Thermistor count on the test pack
pub const THERMISTORS: SourceId = 4;

/// Frame period used by the simulated BMS (ms)
pub const FRAME_PERIOD_MS: Timestamp = 100;

/// Limits for a 30s lithium-ion pack on a 100 A contactor
pub fn test_limits() -> Limits {
    Limits::new(100.0, 4.2, 2.8, 60.0)
}

/// Board configuration that passes validation
pub fn test_config() -> BoardConfig {
    BoardConfig::new()
        .with_limits(test_limits())
        .with_store(StorePolicy::new(1_000, 1))
}

/// Validator for [`test_limits`]
pub fn test_validator() -> KindValidator {
    KindValidator::from_limits(&test_limits())
}

/// Record `values` on `id`, one per frame period starting at `start`.
/// Returns the timestamp of the last reading.
pub fn feed(store: &mut BoardStore, id: ChannelId, values: &[f32], start: Timestamp) -> Timestamp {
    let mut t = start;
    for (i, value) in values.iter().enumerate() {
        t = start + i as Timestamp * FRAME_PERIOD_MS;
        store.record(id, *value, t);
    }
    t
}

/// Record one full BMS broadcast at time `t`: pack values, every module and
/// every thermistor
pub fn broadcast(store: &mut BoardStore, frame: &scenarios::PackFrame, t: Timestamp) {
    store.record(ChannelId::PACK_CURRENT, frame.current, t);
    store.record(ChannelId::PACK_VOLTAGE, frame.pack_voltage, t);
    store.record(ChannelId::STATE_OF_CHARGE, frame.soc, t);
    for module in 0..MODULES {
        store.record(ChannelId::module_voltage(module), frame.module_voltage(module), t);
    }
    for thermistor in 0..THERMISTORS {
        store.record(ChannelId::temperature(thermistor), frame.temperature(thermistor), t);
    }
}
