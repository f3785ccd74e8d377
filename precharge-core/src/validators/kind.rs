//! Per-kind rules derived from the board limits

use crate::config::Limits;
use crate::reading::{MeasurementKind, Reading};

use super::{RangeValidator, Validator};

/// Dispatches each reading to the rule for its measurement kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindValidator {
    /// Pack current rule
    pub pack_current: RangeValidator,
    /// Pack voltage rule
    pub pack_voltage: RangeValidator,
    /// State of charge rule
    pub state_of_charge: RangeValidator,
    /// Module voltage rule
    pub module_voltage: RangeValidator,
    /// Temperature rule
    pub temperature: RangeValidator,
}

impl KindValidator {
    /// Rules for the given absolute maximum ratings
    pub fn from_limits(limits: &Limits) -> Self {
        Self {
            pack_current: RangeValidator::magnitude(limits.current_limit),
            pack_voltage: RangeValidator::at_least(0.0),
            state_of_charge: RangeValidator::new(0.0, 100.0),
            module_voltage: RangeValidator::new(limits.low_voltage_limit, limits.high_voltage_limit),
            temperature: RangeValidator::at_most(limits.temp_limit),
        }
    }

    /// Rule used for `kind`
    pub fn rule(&self, kind: MeasurementKind) -> &RangeValidator {
        match kind {
            MeasurementKind::PackCurrent => &self.pack_current,
            MeasurementKind::PackVoltage => &self.pack_voltage,
            MeasurementKind::StateOfCharge => &self.state_of_charge,
            MeasurementKind::ModuleVoltage => &self.module_voltage,
            MeasurementKind::Temperature => &self.temperature,
        }
    }
}

impl Validator for KindValidator {
    fn is_valid(&self, reading: &Reading) -> bool {
        self.rule(reading.kind()).is_valid(reading)
    }
}
