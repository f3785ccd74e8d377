//! Canned BMS broadcasts

use precharge_core::SourceId;

use super::MODULES;

/// Values carried by one simulated BMS broadcast
#[derive(Debug, Clone, Copy)]
pub struct PackFrame {
    pub current: f32,
    pub pack_voltage: f32,
    pub soc: f32,
    /// Nominal module voltage
    pub cell: f32,
    /// Module reporting a different voltage, if any
    pub odd_module: Option<(SourceId, f32)>,
    /// Nominal temperature
    pub temp: f32,
    /// Thermistor reporting a different temperature, if any
    pub hot_spot: Option<(SourceId, f32)>,
}

impl PackFrame {
    /// Idle pack at rest
    pub fn resting() -> Self {
        Self {
            current: 0.5,
            pack_voltage: 3.7 * MODULES as f32,
            soc: 72.0,
            cell: 3.7,
            odd_module: None,
            temp: 24.0,
            hot_spot: None,
        }
    }

    /// Pack under load with one sagging module
    pub fn under_load() -> Self {
        Self {
            current: 65.0,
            pack_voltage: 3.55 * MODULES as f32,
            soc: 70.0,
            cell: 3.56,
            odd_module: Some((5, 3.41)),
            temp: 31.0,
            hot_spot: Some((2, 38.5)),
        }
    }

    /// Frame carrying a corrupted module voltage
    pub fn glitched(module: SourceId) -> Self {
        let mut frame = Self::resting();
        frame.odd_module = Some((module, 0.0));
        frame
    }

    pub fn module_voltage(&self, module: SourceId) -> f32 {
        match self.odd_module {
            Some((id, value)) if id == module => value,
            _ => self.cell,
        }
    }

    pub fn temperature(&self, thermistor: SourceId) -> f32 {
        match self.hot_spot {
            Some((id, value)) if id == thermistor => value,
            _ => self.temp,
        }
    }
}
