//! Sample Store
//!
//! ## Overview
//!
//! The store maps channel ids to channels. The CAN receive path calls
//! [`SampleStore::record`] with every decoded value; the control loop asks
//! [`SampleStore::is_fresh`], [`SampleStore::is_healthy`] and
//! [`SampleStore::latest`] on its own period and decides relay, LED and fan
//! state from the answers.
//!
//! ```text
//!  CAN RX (decoded)                      control loop
//!        │ record(id, value, t)               │ is_healthy(id, now, rule)
//!        ▼                                    ▼
//!  ┌───────────────────────── SampleStore ─────────────────────────┐
//!  │ pack_current      [r r r r r]                                 │
//!  │ module_voltage[0] [r r r r r]                                 │
//!  │ temperature[3]    [r r r . .]   ← created on first reading    │
//!  └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//!
//! Nothing here fails hard:
//!
//! - `record` on an unknown channel creates it.
//! - Queries on an unknown channel answer empty, not fresh, not healthy.
//! - When all `C` channel slots are taken, a reading for a new channel is
//!   dropped, counted and logged. Existing channels keep working.
//!
//! ## Memory
//!
//! Channels live inline in a `heapless::LinearMap`, so a store is one fixed
//! block sized at compile time. Lookups scan linearly, which at a few dozen
//! channels is cheaper than hashing on a microcontroller.
//!
//! ## Usage Example
//!
//! ```rust
//! use precharge_core::{ChannelId, SampleStore, RangeValidator, StoreError};
//! use precharge_core::config::StorePolicy;
//!
//! let mut store: SampleStore<5, 8> = SampleStore::new(StorePolicy::new(10, 1));
//! let id = ChannelId::module_voltage(3);
//!
//! for t in 0..5 {
//!     store.record(id, 3.7, t);
//! }
//!
//! let volts = RangeValidator::new(2.8, 4.2);
//! assert!(store.is_healthy(id, 12, &volts));
//! assert!(!store.is_fresh(id, 16));
//!
//! store.reset(id);
//! assert_eq!(store.latest(id), Err(StoreError::ChannelEmpty));
//! ```

use heapless::LinearMap;

use crate::channel::{Channel, ChannelStatus};
use crate::config::StorePolicy;
use crate::constants::buffers::{DATA_POINTS_TO_STORE, MAX_CHANNELS};
use crate::errors::{ConfigError, StoreError, StoreResult};
use crate::reading::{ChannelId, Reading};
use crate::time::Timestamp;
use crate::validators::Validator;

/// Bounded, staleness-aware store of recent readings per channel
///
/// - `N`: readings retained per channel
/// - `C`: maximum number of distinct channels
pub struct SampleStore<const N: usize = DATA_POINTS_TO_STORE, const C: usize = MAX_CHANNELS> {
    channels: LinearMap<ChannelId, Channel<N>, C>,
    policy: StorePolicy,
    dropped: u32,
}

impl<const N: usize, const C: usize> SampleStore<N, C> {
    /// Empty store with the given policy. Usable in `static` initializers.
    pub const fn new(policy: StorePolicy) -> Self {
        Self {
            channels: LinearMap::new(),
            policy,
            dropped: 0,
        }
    }

    /// Empty store, rejecting a policy that does not fit `N`
    pub fn try_new(policy: StorePolicy) -> Result<Self, ConfigError> {
        policy.validate(N)?;
        Ok(Self::new(policy))
    }

    /// Staleness and tolerance in force
    pub const fn policy(&self) -> &StorePolicy {
        &self.policy
    }

    /// Append a reading to `id`, creating the channel on first use.
    ///
    /// Never fails. Values are stored as given; out-of-range values are only
    /// judged later, by the validator passed to a health query.
    pub fn record(&mut self, id: ChannelId, value: f32, timestamp: Timestamp) {
        if let Some(channel) = self.channels.get_mut(&id) {
            channel.record(value, timestamp);
            return;
        }

        let mut channel = Channel::new(id);
        channel.record(value, timestamp);

        match self.channels.insert(id, channel) {
            Ok(_) => log_debug!("{}: channel created", id),
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                log_warn!("{}: channel table full ({} channels), reading dropped", id, C);
            }
        }
    }

    /// Most recent reading on `id`
    pub fn latest(&self, id: ChannelId) -> StoreResult<Reading> {
        self.channels
            .get(&id)
            .and_then(Channel::latest)
            .ok_or(StoreError::ChannelEmpty)
    }

    /// True iff `id` has a reading no older than the age limit
    pub fn is_fresh(&self, id: ChannelId, now: Timestamp) -> bool {
        self.channels
            .get(&id)
            .is_some_and(|channel| channel.is_fresh(now, self.policy.age_limit_ms))
    }

    /// Health of `id` under the store policy and `validator`
    pub fn status<V>(&self, id: ChannelId, now: Timestamp, validator: &V) -> ChannelStatus
    where
        V: Validator + ?Sized,
    {
        match self.channels.get(&id) {
            Some(channel) => channel.status(now, &self.policy, validator),
            None => ChannelStatus::Empty,
        }
    }

    /// True iff `id` is fresh and at most `max_bad_values` stored readings
    /// fail `validator`
    pub fn is_healthy<V>(&self, id: ChannelId, now: Timestamp, validator: &V) -> bool
    where
        V: Validator + ?Sized,
    {
        self.status(id, now, validator).is_healthy()
    }

    /// Latest reading of `id` if the channel is healthy, otherwise why not
    pub fn check<V>(&self, id: ChannelId, now: Timestamp, validator: &V) -> StoreResult<Reading>
    where
        V: Validator + ?Sized,
    {
        if let Some(err) = self.status(id, now, validator).error() {
            return Err(err);
        }
        self.latest(id)
    }

    /// Stored readings of `id` that fail `validator`
    pub fn bad_count<V>(&self, id: ChannelId, validator: &V) -> usize
    where
        V: Validator + ?Sized,
    {
        self.channels
            .get(&id)
            .map_or(0, |channel| channel.bad_count(validator))
    }

    /// Number of readings stored for `id`
    pub fn len(&self, id: ChannelId) -> usize {
        self.channels.get(&id).map_or(0, Channel::len)
    }

    /// Stored readings of `id`, oldest first
    pub fn readings(&self, id: ChannelId) -> impl Iterator<Item = &Reading> + '_ {
        self.channels.get(&id).into_iter().flat_map(Channel::readings)
    }

    /// Channel `id`, if it has ever received a reading
    pub fn channel(&self, id: ChannelId) -> Option<&Channel<N>> {
        self.channels.get(&id)
    }

    /// Every known channel id, in creation order
    pub fn channels(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.channels.keys().copied()
    }

    /// Every known channel, in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Channel<N>> + '_ {
        self.channels.values()
    }

    /// Number of known channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Readings dropped because the channel table was full
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Forget every reading on `id`. The channel keeps its slot.
    pub fn reset(&mut self, id: ChannelId) {
        if let Some(channel) = self.channels.get_mut(&id) {
            channel.reset();
            log_info!("{}: channel reset", id);
        }
    }

    /// Forget every reading on every channel
    pub fn reset_all(&mut self) {
        for (_, channel) in self.channels.iter_mut() {
            channel.reset();
        }
        log_info!("all {} channels reset", self.channels.len());
    }
}

impl<const N: usize, const C: usize> Default for SampleStore<N, C> {
    fn default() -> Self {
        Self::new(StorePolicy::DEFAULT)
    }
}
