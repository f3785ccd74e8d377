//! Inclusive range rule

use crate::reading::Reading;

use super::Validator;

/// Accepts finite values within `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeValidator {
    min: f32,
    max: f32,
}

impl RangeValidator {
    /// Build a range; swapped bounds are put back in order
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Self { min, max }
    }

    /// Everything up to `max`
    pub fn at_most(max: f32) -> Self {
        Self { min: f32::NEG_INFINITY, max }
    }

    /// Everything from `min` up
    pub fn at_least(min: f32) -> Self {
        Self { min, max: f32::INFINITY }
    }

    /// Magnitude no larger than `limit`, either sign
    pub fn magnitude(limit: f32) -> Self {
        let limit = libm::fabsf(limit);
        Self { min: -limit, max: limit }
    }

    /// Lower bound
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f32 {
        self.max
    }

    /// True if `value` is finite and inside the range
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

impl Validator for RangeValidator {
    fn is_valid(&self, reading: &Reading) -> bool {
        self.contains(reading.value())
    }
}
