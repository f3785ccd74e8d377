//! Integration tests for the sample store
//!
//! Drives the store the way the board does: the CAN path records full BMS
//! broadcasts on a fixed period and the control loop polls freshness, health
//! and snapshots between them.

mod common;

use precharge_core::{
    channel::ChannelStatus,
    config::{PinConfig, StorePolicy},
    pack::Extremes,
    time::{FixedTime, TimeSource},
    ChannelId, ConfigError, PackSnapshot, SampleStore, SharedSampleStore, StoreError, Validator,
};

use common::{
    broadcast, feed, scenarios::PackFrame, test_config, test_validator, BoardStore, TinyStore,
    FRAME_PERIOD_MS, MODULES, THERMISTORS,
};

fn board_store() -> BoardStore {
    let config = test_config();
    SampleStore::try_new(config.store).expect("test policy is valid")
}

#[test]
fn test_config_is_valid() {
    assert_eq!(test_config().validate(), Ok(()));
}

#[test]
fn shipped_header_values_do_not_validate() {
    let config = precharge_core::BoardConfig::default();
    assert_eq!(
        config.validate(),
        Err(ConfigError::LimitUnset { name: "CURRENT_LIMIT" })
    );
}

#[test]
fn both_board_revisions_have_distinct_pins() {
    assert_eq!(PinConfig::REV_A.validate(), Ok(()));
    assert_eq!(PinConfig::REV_B.validate(), Ok(()));
    assert_ne!(PinConfig::REV_A, PinConfig::REV_B);
}

#[test]
fn steady_broadcasts_keep_every_channel_healthy() {
    let mut store = board_store();
    let validator = test_validator();
    let mut clock = FixedTime::new(0);

    for _ in 0..20 {
        broadcast(&mut store, &PackFrame::resting(), clock.now());
        clock.advance(FRAME_PERIOD_MS);
    }

    assert_eq!(store.channel_count(), 3 + MODULES as usize + THERMISTORS as usize);
    for id in store.channels() {
        assert_eq!(store.len(id), 5, "{id:?}");
        assert_eq!(store.status(id, clock.now(), &validator), ChannelStatus::Healthy, "{id:?}");
    }
    assert_eq!(store.dropped(), 0);
}

#[test]
fn bms_silence_makes_everything_stale() {
    let mut store = board_store();
    let validator = test_validator();

    broadcast(&mut store, &PackFrame::resting(), 0);
    assert!(store.is_healthy(ChannelId::PACK_VOLTAGE, 1_000, &validator));

    // no frames for longer than the age limit
    let now = 1_001;
    for id in store.channels() {
        assert!(!store.is_fresh(id, now));
        assert_eq!(
            store.check(id, now, &validator),
            Err(StoreError::Stale { age_ms: 1_001, limit_ms: 1_000 })
        );
    }

    // the last values are still there for diagnostics
    assert_eq!(store.latest(ChannelId::STATE_OF_CHARGE).map(|r| r.value()), Ok(72.0));
}

#[test]
fn single_glitch_is_tolerated_second_is_not() {
    let mut store = board_store();
    let validator = test_validator();
    let cell = ChannelId::module_voltage(4);

    broadcast(&mut store, &PackFrame::resting(), 0);
    broadcast(&mut store, &PackFrame::glitched(4), 100);
    broadcast(&mut store, &PackFrame::resting(), 200);
    assert_eq!(store.bad_count(cell, &validator), 1);
    assert!(store.is_healthy(cell, 200, &validator));

    broadcast(&mut store, &PackFrame::glitched(4), 300);
    assert_eq!(
        store.status(cell, 300, &validator),
        ChannelStatus::Unhealthy { bad: 2, tolerated: 1 }
    );

    // neighbours are unaffected
    assert!(store.is_healthy(ChannelId::module_voltage(3), 300, &validator));
}

#[test]
fn bad_values_age_out_of_the_window() {
    let mut store = board_store();
    let validator = test_validator();
    let cell = ChannelId::module_voltage(0);

    let last = feed(&mut store, cell, &[0.0, 0.0, 3.7, 3.7, 3.7], 0);
    assert!(!store.is_healthy(cell, last, &validator));

    let last = feed(&mut store, cell, &[3.7, 3.7], last + FRAME_PERIOD_MS);
    assert_eq!(store.bad_count(cell, &validator), 0);
    assert!(store.is_healthy(cell, last, &validator));
}

#[test]
fn reset_recovers_a_faulted_channel() {
    let mut store = board_store();
    let validator = test_validator();
    let cell = ChannelId::module_voltage(2);

    feed(&mut store, cell, &[9.9, 9.9, 9.9], 0);
    assert!(!store.is_healthy(cell, 200, &validator));

    store.reset(cell);
    assert_eq!(store.latest(cell), Err(StoreError::ChannelEmpty));
    assert_eq!(store.status(cell, 200, &validator), ChannelStatus::Empty);

    store.record(cell, 3.7, 300);
    assert!(store.is_healthy(cell, 300, &validator));
}

#[test]
fn snapshot_reports_pack_extremes() {
    let mut store = board_store();
    broadcast(&mut store, &PackFrame::under_load(), 0);

    let snapshot = PackSnapshot::capture(&store, 50);
    assert!(snapshot.is_complete());
    assert_eq!(snapshot.pack.current, Some(65.0));
    assert_eq!(snapshot.pack.soc, Some(70.0));

    let cells = snapshot.voltages.expect("modules reported");
    assert_eq!(cells.high, 3.56);
    assert_eq!(cells.high_id, 0);
    assert_eq!((cells.low, cells.low_id), (3.41, 5));

    assert_eq!(
        snapshot.temperatures,
        Some(Extremes { high: 38.5, high_id: 2, low: 31.0, low_id: 0 })
    );
}

#[test]
fn snapshot_drops_stale_streams() {
    let mut store = board_store();
    broadcast(&mut store, &PackFrame::resting(), 0);
    // only pack voltage keeps arriving
    store.record(ChannelId::PACK_VOLTAGE, 29.5, 1_500);

    let snapshot = PackSnapshot::capture(&store, 2_000);
    assert_eq!(snapshot.pack.voltage, Some(29.5));
    assert_eq!(snapshot.pack.current, None);
    assert!(snapshot.voltages.is_none());
    assert!(snapshot.temperatures.is_none());
}

#[test]
fn full_channel_table_keeps_existing_channels() {
    let mut store = TinyStore::new(StorePolicy::new(1_000, 1));
    for module in 0..6 {
        store.record(ChannelId::module_voltage(module), 3.7, 0);
    }

    assert_eq!(store.channel_count(), 4);
    assert_eq!(store.dropped(), 2);
    assert!(store.is_fresh(ChannelId::module_voltage(3), 10));
    assert!(!store.is_fresh(ChannelId::module_voltage(5), 10));
}

#[test]
fn closure_validator_for_charge_direction() {
    let mut store = board_store();
    feed(&mut store, ChannelId::PACK_CURRENT, &[12.0, 11.5, -2.0], 0);

    let discharging = |r: &precharge_core::Reading| r.value() >= 0.0;
    assert!(!discharging.is_valid(&store.latest(ChannelId::PACK_CURRENT).unwrap()));
    assert_eq!(store.bad_count(ChannelId::PACK_CURRENT, &discharging), 1);
    assert!(store.is_healthy(ChannelId::PACK_CURRENT, 200, &discharging));
}

#[test]
fn shared_store_in_a_static() {
    static STORE: SharedSampleStore = SharedSampleStore::new(StorePolicy::new(1_000, 1));
    let validator = test_validator();

    let rx = std::thread::spawn(|| {
        for i in 0..10u64 {
            STORE.record(ChannelId::PACK_VOLTAGE, 29.6, i * FRAME_PERIOD_MS);
            STORE.record(ChannelId::temperature(0), 25.0, i * FRAME_PERIOD_MS);
        }
    });
    rx.join().unwrap();

    assert!(STORE.is_healthy(ChannelId::PACK_VOLTAGE, 1_000, &validator));
    assert_eq!(STORE.latest(ChannelId::temperature(0)).map(|r| r.timestamp()), Ok(900));

    let snapshot = STORE.snapshot(1_000);
    assert_eq!(snapshot.pack.voltage, Some(29.6));
    assert_eq!(
        snapshot.temperatures.map(|t| (t.high_id, t.high)),
        Some((0, 25.0))
    );

    STORE.reset_all();
    assert_eq!(STORE.latest(ChannelId::PACK_VOLTAGE), Err(StoreError::ChannelEmpty));
}
