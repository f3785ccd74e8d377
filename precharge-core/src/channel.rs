//! A Single Measurement Channel
//!
//! ## Overview
//!
//! A channel keeps the last `N` readings of one stream, plus the timestamp of
//! the newest one. Everything the control loop asks about a channel is worked
//! out from those at query time:
//!
//! - **Fresh**: `now - latest <= age_limit`
//! - **Bad count**: stored readings failing the caller's validator
//! - **Healthy**: fresh, and bad count `<= max_bad_values`
//!
//! Staleness is never stored, so a channel that stops receiving frames goes
//! stale on its own without anyone having to notice.
//!
//! ## Why Count Over a Window?
//!
//! A single corrupted CAN frame or a sensor glitch should not trip a fault.
//! With five readings and a tolerance of one, one bad value is absorbed; a
//! second one inside the same window is treated as a real problem:
//!
//! ```text
//! window:  3.71  3.70  9.99  3.70  3.69    1 bad  → healthy
//! window:  3.71  9.99  3.70  0.00  3.69    2 bad  → unhealthy
//! ```
//!
//! The bad value ages out of the window after `N` more readings.

use crate::buffer::{CircularBuffer, CircularBufferIter};
use crate::config::StorePolicy;
use crate::errors::StoreError;
use crate::reading::{ChannelId, Reading};
use crate::time::{age_ms, Timestamp};
use crate::validators::Validator;

/// Health of a channel at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelStatus {
    /// Nothing recorded
    Empty,
    /// Latest reading older than the age limit
    Stale {
        /// Age of the latest reading
        age_ms: Timestamp,
        /// Configured limit
        limit_ms: Timestamp,
    },
    /// Fresh, but too many stored readings fail the validator
    Unhealthy {
        /// Failing readings
        bad: usize,
        /// Configured tolerance
        tolerated: usize,
    },
    /// Fresh and within tolerance
    Healthy,
}

impl ChannelStatus {
    /// True only for [`ChannelStatus::Healthy`]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, ChannelStatus::Healthy)
    }

    /// True if the latest reading is within the age limit
    pub const fn is_fresh(&self) -> bool {
        matches!(self, ChannelStatus::Healthy | ChannelStatus::Unhealthy { .. })
    }

    /// The matching store error, `None` when healthy
    pub const fn error(&self) -> Option<StoreError> {
        match *self {
            ChannelStatus::Empty => Some(StoreError::ChannelEmpty),
            ChannelStatus::Stale { age_ms, limit_ms } => Some(StoreError::Stale { age_ms, limit_ms }),
            ChannelStatus::Unhealthy { bad, tolerated } => Some(StoreError::Unhealthy { bad, tolerated }),
            ChannelStatus::Healthy => None,
        }
    }
}

/// Bounded history of one measurement stream
#[derive(Debug, Clone)]
pub struct Channel<const N: usize> {
    id: ChannelId,
    readings: CircularBuffer<Reading, N>,
    latest_timestamp: Option<Timestamp>,
    recorded: u32,
}

impl<const N: usize> Channel<N> {
    /// Empty channel
    pub const fn new(id: ChannelId) -> Self {
        Self {
            id,
            readings: CircularBuffer::new(),
            latest_timestamp: None,
            recorded: 0,
        }
    }

    /// Which stream this is
    pub const fn id(&self) -> ChannelId {
        self.id
    }

    /// Append a reading, returning the one evicted to make room
    pub fn record(&mut self, value: f32, timestamp: Timestamp) -> Option<Reading> {
        if let Some(previous) = self.latest_timestamp {
            if timestamp < previous {
                log_warn!(
                    "{}: timestamp went backwards ({} < {})",
                    self.id,
                    timestamp,
                    previous
                );
            }
        }

        let evicted = self.readings.push(Reading::new(self.id, value, timestamp));
        self.latest_timestamp = Some(timestamp);
        self.recorded = self.recorded.wrapping_add(1);

        if let Some(old) = &evicted {
            log_trace!("{}: evicted reading from t={}", self.id, old.timestamp());
        }

        evicted
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<Reading> {
        self.readings.last().copied()
    }

    /// Timestamp of the most recent reading
    pub const fn latest_timestamp(&self) -> Option<Timestamp> {
        self.latest_timestamp
    }

    /// Stored readings, oldest first
    pub fn readings(&self) -> CircularBufferIter<'_, Reading, N> {
        self.readings.iter()
    }

    /// Number of stored readings
    pub const fn len(&self) -> usize {
        self.readings.len()
    }

    /// True if nothing is stored
    pub const fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Readings recorded since creation, including evicted ones. Wraps.
    pub const fn recorded(&self) -> u32 {
        self.recorded
    }

    /// Age of the latest reading, `None` if empty
    pub fn age_ms(&self, now: Timestamp) -> Option<Timestamp> {
        self.latest_timestamp.map(|latest| age_ms(now, latest))
    }

    /// True if there is a reading no older than `age_limit_ms`
    pub fn is_fresh(&self, now: Timestamp, age_limit_ms: Timestamp) -> bool {
        matches!(self.age_ms(now), Some(age) if age <= age_limit_ms)
    }

    /// Stored readings the validator rejects
    pub fn bad_count<V>(&self, validator: &V) -> usize
    where
        V: Validator + ?Sized,
    {
        self.readings.iter().filter(|r| !validator.is_valid(r)).count()
    }

    /// Apply the health policy. Empty beats stale beats unhealthy.
    pub fn status<V>(&self, now: Timestamp, policy: &StorePolicy, validator: &V) -> ChannelStatus
    where
        V: Validator + ?Sized,
    {
        let Some(age) = self.age_ms(now) else {
            return ChannelStatus::Empty;
        };

        if age > policy.age_limit_ms {
            return ChannelStatus::Stale {
                age_ms: age,
                limit_ms: policy.age_limit_ms,
            };
        }

        let bad = self.bad_count(validator);
        if bad > policy.max_bad_values {
            ChannelStatus::Unhealthy {
                bad,
                tolerated: policy.max_bad_values,
            }
        } else {
            ChannelStatus::Healthy
        }
    }

    /// Forget every reading
    pub fn reset(&mut self) {
        self.readings.clear();
        self.latest_timestamp = None;
    }
}
