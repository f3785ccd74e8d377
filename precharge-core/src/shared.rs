//! Interrupt-Safe Shared Store
//!
//! On the board the CAN receive interrupt records readings while the main
//! loop queries them. A ring buffer caught half-way through a push by a query
//! could report a reading that was never recorded, so every access here runs
//! inside a critical section: interrupts are masked for the few hundred cycles
//! a push or a health count takes, and nothing else is ever locked.
//!
//! ```text
//!   CAN RX ISR ── record ──┐
//!                          ▼
//!            critical_section::with(|cs| ...)
//!                          ▲
//!   main loop ─ is_healthy ┘
//! ```
//!
//! The wrapper is `Sync` and `const`-constructible, so it can be a `static`:
//!
//! ```rust
//! use precharge_core::{ChannelId, SharedSampleStore};
//! use precharge_core::config::StorePolicy;
//!
//! static STORE: SharedSampleStore = SharedSampleStore::new(StorePolicy::DEFAULT);
//!
//! // CAN RX interrupt
//! STORE.record(ChannelId::PACK_VOLTAGE, 112.4, 1_000);
//!
//! // control loop
//! assert!(STORE.is_fresh(ChannelId::PACK_VOLTAGE, 1_500));
//! ```
//!
//! A host build needs a critical-section implementation linked in (the
//! `critical-section/std` feature does this for tests).

use core::cell::RefCell;

use critical_section::Mutex;

use crate::channel::ChannelStatus;
use crate::config::StorePolicy;
use crate::constants::buffers::{DATA_POINTS_TO_STORE, MAX_CHANNELS};
use crate::errors::StoreResult;
use crate::pack::PackSnapshot;
use crate::reading::{ChannelId, Reading};
use crate::store::SampleStore;
use crate::time::Timestamp;
use crate::validators::Validator;

/// [`SampleStore`] shared between an interrupt and the main loop
pub struct SharedSampleStore<const N: usize = DATA_POINTS_TO_STORE, const C: usize = MAX_CHANNELS> {
    inner: Mutex<RefCell<SampleStore<N, C>>>,
}

impl<const N: usize, const C: usize> SharedSampleStore<N, C> {
    /// Empty shared store
    pub const fn new(policy: StorePolicy) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SampleStore::new(policy))),
        }
    }

    /// Run `f` against the store with interrupts masked.
    ///
    /// Use this when several queries must see the same instant, e.g. a
    /// status check followed by a read of the latest value.
    pub fn with<R>(&self, f: impl FnOnce(&mut SampleStore<N, C>) -> R) -> R {
        critical_section::with(|cs| {
            let mut store = self.inner.borrow_ref_mut(cs);
            f(&mut *store)
        })
    }

    /// See [`SampleStore::record`]
    pub fn record(&self, id: ChannelId, value: f32, timestamp: Timestamp) {
        self.with(|store| store.record(id, value, timestamp));
    }

    /// See [`SampleStore::latest`]
    pub fn latest(&self, id: ChannelId) -> StoreResult<Reading> {
        self.with(|store| store.latest(id))
    }

    /// See [`SampleStore::is_fresh`]
    pub fn is_fresh(&self, id: ChannelId, now: Timestamp) -> bool {
        self.with(|store| store.is_fresh(id, now))
    }

    /// See [`SampleStore::status`]
    pub fn status<V>(&self, id: ChannelId, now: Timestamp, validator: &V) -> ChannelStatus
    where
        V: Validator + ?Sized,
    {
        self.with(|store| store.status(id, now, validator))
    }

    /// See [`SampleStore::is_healthy`]
    pub fn is_healthy<V>(&self, id: ChannelId, now: Timestamp, validator: &V) -> bool
    where
        V: Validator + ?Sized,
    {
        self.with(|store| store.is_healthy(id, now, validator))
    }

    /// See [`SampleStore::check`]
    pub fn check<V>(&self, id: ChannelId, now: Timestamp, validator: &V) -> StoreResult<Reading>
    where
        V: Validator + ?Sized,
    {
        self.with(|store| store.check(id, now, validator))
    }

    /// See [`SampleStore::reset`]
    pub fn reset(&self, id: ChannelId) {
        self.with(|store| store.reset(id));
    }

    /// See [`SampleStore::reset_all`]
    pub fn reset_all(&self) {
        self.with(|store| store.reset_all());
    }

    /// Consistent pack snapshot taken in one critical section
    pub fn snapshot(&self, now: Timestamp) -> PackSnapshot {
        self.with(|store| PackSnapshot::capture(&*store, now))
    }
}

impl<const N: usize, const C: usize> Default for SharedSampleStore<N, C> {
    fn default() -> Self {
        Self::new(StorePolicy::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::validators::RangeValidator;

    #[test]
    fn shared_store_round_trip() {
        let shared: SharedSampleStore<5, 4> = SharedSampleStore::new(StorePolicy::new(100, 1));
        let id = ChannelId::temperature(2);

        shared.record(id, 31.0, 10);
        shared.record(id, 31.5, 20);

        assert_eq!(shared.latest(id).map(|r| r.value()), Ok(31.5));
        assert!(shared.is_fresh(id, 120));
        assert!(!shared.is_fresh(id, 121));
        assert!(shared.is_healthy(id, 50, &RangeValidator::at_most(60.0)));

        shared.reset(id);
        assert_eq!(shared.latest(id), Err(StoreError::ChannelEmpty));
    }

    #[test]
    fn with_gives_one_consistent_view() {
        let shared: SharedSampleStore<5, 4> = SharedSampleStore::default();
        shared.record(ChannelId::PACK_CURRENT, 4.0, 0);
        shared.record(ChannelId::PACK_VOLTAGE, 110.0, 0);

        let (count, current) = shared.with(|store| {
            (store.channel_count(), store.latest(ChannelId::PACK_CURRENT))
        });
        assert_eq!(count, 2);
        assert_eq!(current.map(|r| r.value()), Ok(4.0));
    }

    #[cfg(feature = "std")]
    #[test]
    fn recording_from_another_thread() {
        static STORE: SharedSampleStore<5, 8> = SharedSampleStore::new(StorePolicy::DEFAULT);

        let producer = std::thread::spawn(|| {
            for t in 0..100u64 {
                STORE.record(ChannelId::module_voltage((t % 4) as u8), 3.7, t);
            }
        });
        producer.join().unwrap();

        for module in 0..4 {
            let id = ChannelId::module_voltage(module);
            assert_eq!(STORE.with(|store| store.len(id)), 5);
        }
    }
}
