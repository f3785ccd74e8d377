//! CAN Bus Constants
//!
//! Frame identifiers are 11-bit standard ids built as `base + offset`. The BMS
//! publishes pack status, module voltage extremes and temperature/DTC frames
//! on its base; the battery protection system (BPS) board publishes vehicle
//! faults on its own base.

/// Bus speed (bit/s).
///
/// Shared by the BMS and every node on the battery bus.
pub const CAN_BAUD: u32 = 125_000;

/// Standard 11-bit identifier mask.
pub const CAN_MASK: u16 = 0x07FF;

/// Base address of frames sent by the BMS.
pub const BMS_CAN_BASE: u16 = 0x600;

/// Base address of frames sent by this board.
pub const BPS_CAN_BASE: u16 = 0x700;

/// Battery pack high voltage status: current, voltage, state of charge.
pub const PACK_STATUS: u16 = 0x0B0;

/// Voltage measurement status of all individual modules (high/low + ids).
pub const HILO_VOLTS: u16 = 0x0B1;

/// Temperature status and diagnostic trouble codes of the BMS.
pub const TEMP_DTC: u16 = 0x0B2;

/// Battery pack or power distribution fault on high voltage or DC-DC.
pub const VEHICLE_FAULT: u16 = 0x00F;
