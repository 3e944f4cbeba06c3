//! Value identifiers and wire formats for the supervisor protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a configurable or readable quantity on the supervisor
/// node.
///
/// Ids are stable across the protocol. Not every named id carries a
/// registered wire format; unregistered ids are reserved until the
/// supervisor firmware starts serving them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValueId(pub u16);

impl ValueId {
    pub const NOP: ValueId = ValueId(0);

    pub const MAX_SPEED_LEVEL: ValueId = ValueId(10);
    pub const FLIP_JOYSTICK: ValueId = ValueId(11);

    pub const MAX_TURN_RATE: ValueId = ValueId(20);
    pub const MIN_TURN_RATE: ValueId = ValueId(21);
    pub const MAX_LIN_ACC: ValueId = ValueId(22);
    pub const MAX_ANG_ACC: ValueId = ValueId(23);

    /// Per-motor enable switches, one id per motor controller.
    pub const M10_ON: ValueId = ValueId(30);
    pub const M11_ON: ValueId = ValueId(31);
    pub const M12_ON: ValueId = ValueId(32);
    pub const M13_ON: ValueId = ValueId(33);
    pub const M14_ON: ValueId = ValueId(34);
    pub const M15_ON: ValueId = ValueId(35);

    pub const BATT_LO: ValueId = ValueId(40);
    pub const BATT_HI: ValueId = ValueId(41);

    pub const WHEEL_TRACK: ValueId = ValueId(50);
    pub const WHEEL_BASELINE: ValueId = ValueId(51);
    pub const WHEEL_GEAR_RATIO: ValueId = ValueId(52);
    pub const WHEEL_RADIUS: ValueId = ValueId(53);

    pub const PTO_CUR_DEV: ValueId = ValueId(80);
    pub const PTO_CUR_RPM: ValueId = ValueId(81);
    pub const PTO_MIN_RPM: ValueId = ValueId(82);
    pub const PTO_MAX_RPM: ValueId = ValueId(83);
    pub const PTO_DEF_RPM: ValueId = ValueId(84);
    // Collides with PTO_DEF_RPM in the upstream id catalog; kept as a
    // distinct name until the catalog resolves it. The registry logs the
    // collision at startup.
    pub const PTO_GEAR_RATIO: ValueId = ValueId(84);

    pub const STEERING_GAMMA: ValueId = ValueId(90);
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed payload width of every supervisor value, padding included.
pub const VALUE_PAYLOAD_LEN: usize = 4;

/// Wire encoding of a supervisor value inside its fixed 4-byte payload.
///
/// Little-endian throughout. Values narrower than the payload are padded
/// with trailing zero bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireFormat {
    /// Signed 16-bit integer, 2 pad bytes.
    Int16,
    /// Unsigned 16-bit integer, 2 pad bytes.
    UInt16,
    /// 32-bit float, no padding.
    Float32,
    /// Single byte boolean, 3 pad bytes.
    Bool,
}

impl WireFormat {
    /// Width in bytes of the value itself, excluding payload padding.
    pub const fn value_size(&self) -> usize {
        match self {
            WireFormat::Int16 | WireFormat::UInt16 => 2,
            WireFormat::Float32 => 4,
            WireFormat::Bool => 1,
        }
    }
}

/// Runtime value decoded from, or destined for, a supervisor payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int16(i16),
    UInt16(u16),
    Float32(f32),
    Bool(bool),
}

impl Value {
    /// The wire format this value encodes as.
    pub const fn wire_format(&self) -> WireFormat {
        match self {
            Value::Int16(_) => WireFormat::Int16,
            Value::UInt16(_) => WireFormat::UInt16,
            Value::Float32(_) => WireFormat::Float32,
            Value::Bool(_) => WireFormat::Bool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_sizes_fit_the_payload() {
        for fmt in [WireFormat::Int16, WireFormat::UInt16, WireFormat::Float32, WireFormat::Bool] {
            assert!(fmt.value_size() <= VALUE_PAYLOAD_LEN);
        }
        assert_eq!(WireFormat::Int16.value_size(), 2);
        assert_eq!(WireFormat::UInt16.value_size(), 2);
        assert_eq!(WireFormat::Float32.value_size(), 4);
        assert_eq!(WireFormat::Bool.value_size(), 1);
    }

    #[test]
    fn value_reports_its_format() {
        assert_eq!(Value::Int16(-5).wire_format(), WireFormat::Int16);
        assert_eq!(Value::UInt16(1500).wire_format(), WireFormat::UInt16);
        assert_eq!(Value::Float32(0.5).wire_format(), WireFormat::Float32);
        assert_eq!(Value::Bool(true).wire_format(), WireFormat::Bool);
    }

    #[test]
    fn pto_default_rpm_and_gear_ratio_share_an_id() {
        // Known catalog collision, flagged by the registry at build time.
        assert_eq!(ValueId::PTO_DEF_RPM, ValueId::PTO_GEAR_RATIO);
    }
}
