//! Store Sizing
//!
//! Every channel is a fixed ring of readings, and the store holds a fixed
//! number of channels. Both are compile-time capacities; nothing grows after
//! boot.

/// Readings retained per channel.
///
/// Five readings is enough to vote out a single corrupted CAN frame while
/// still reacting to a real fault within a handful of broadcast periods.
pub const DATA_POINTS_TO_STORE: usize = 5;

/// Out-of-range readings a channel may hold and still be healthy.
///
/// One bad value out of [`DATA_POINTS_TO_STORE`] absorbs a glitch; two means
/// the sensor or its wiring is suspect.
pub const MAX_ACCEPTABLE_BAD_VALUES: usize = 1;

/// Channels tracked by one store.
///
/// Three pack-level channels (current, voltage, state of charge) plus room for
/// module voltage and thermistor channels.
pub const MAX_CHANNELS: usize = 64;
