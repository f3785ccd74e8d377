//! Time handling for the sample store
//!
//! All timestamps are monotonic milliseconds since boot. The store never reads
//! a clock itself: callers pass `now` into every query, which keeps the store
//! testable without hardware. A `TimeSource` is only needed by callers that
//! want to hand the store a clock instead of a number.

/// Monotonic milliseconds since boot
pub type Timestamp = u64;

/// Source of monotonic time
pub trait TimeSource {
    /// Current time in milliseconds since boot
    fn now(&self) -> Timestamp;
}

/// Age of a timestamp relative to `now`.
///
/// Saturates at zero, so a timestamp from the future counts as brand new
/// rather than wrapping into an enormous age.
pub const fn age_ms(now: Timestamp, then: Timestamp) -> Timestamp {
    now.saturating_sub(then)
}

/// Hand-driven clock for tests and simulation
#[derive(Debug, Clone, Default)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Create a clock stopped at `timestamp`
    pub const fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to an absolute time
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move the clock forward
    pub fn advance(&mut self, ms: u64) {
        self.timestamp = self.timestamp.saturating_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Host clock counting from construction (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemMonotonic {
    boot: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemMonotonic {
    /// Start counting from now
    pub fn new() -> Self {
        Self { boot: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for SystemMonotonic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for SystemMonotonic {
    fn now(&self) -> Timestamp {
        self.boot.elapsed().as_millis() as Timestamp
    }
}
