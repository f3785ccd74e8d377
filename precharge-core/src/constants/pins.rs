//! Pin Assignments
//!
//! Two board revisions were laid out with different LED and relay pins. The
//! precharge switch and fan pin did not move.

// ===== REVISION A =====

/// Precharge request switch input.
pub const PRECHARGE_SWITCH: u8 = 11;

/// Precharge status LED.
pub const PRECHARGE_LED: u8 = 31;

/// Battery box fan enable.
pub const FAN_CONTROL_PIN: u8 = 50;

/// Low side contactor.
pub const RELAY1_LOW_SIDE: u8 = 53;

/// High side contactor.
pub const RELAY2_HIGH_SIDE: u8 = 51;

/// Precharge resistor relay.
pub const RELAY3_PRECHARGE: u8 = 49;

/// Solar MPPT relay.
pub const RELAY4_MPPT: u8 = 47;

// ===== REVISION B =====

/// Precharge status LED on revision B.
pub const REV_B_PRECHARGE_LED: u8 = 52;

/// Low side contactor on revision B.
pub const REV_B_RELAY1_LOW_SIDE: u8 = 48;

/// High side contactor on revision B.
pub const REV_B_RELAY2_HIGH_SIDE: u8 = 46;

/// Precharge resistor relay on revision B.
pub const REV_B_RELAY3_PRECHARGE: u8 = 44;

/// Solar MPPT relay on revision B.
pub const REV_B_RELAY4_MPPT: u8 = 42;
