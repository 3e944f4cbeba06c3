//! Wire-format registry for supervisor values.
//!
//! Maps each [`ValueId`] to the [`WireFormat`] its 4-byte payload uses.
//! The table is fixed at compile time and built into a lookup map once,
//! on first use; there is no runtime registration. Ids without an entry
//! are reserved — decoding them fails with
//! [`ProtocolError::UnregisteredValueId`] so the caller never guesses a
//! format.
//!
//! # Payload layout
//!
//! Every value occupies exactly [`VALUE_PAYLOAD_LEN`] bytes,
//! little-endian, padded with trailing zeros:
//!
//! | Format  | Layout                  |
//! |---------|-------------------------|
//! | Int16   | `i16` + 2 pad bytes     |
//! | UInt16  | `u16` + 2 pad bytes     |
//! | Float32 | `f32`, no padding       |
//! | Bool    | `u8` + 3 pad bytes      |

use crate::error::{ProtocolError, Result};
use crate::types::{VALUE_PAYLOAD_LEN, Value, ValueId, WireFormat};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Registered value formats, one row per id the supervisor serves today.
///
/// `PTO_DEF_RPM` and `PTO_GEAR_RATIO` currently collide on id 84 in the
/// upstream catalog; both rows are kept so the collision is visible here
/// and flagged at build time instead of silently merged.
const FORMAT_TABLE: &[(ValueId, WireFormat)] = &[
    (ValueId::MAX_SPEED_LEVEL, WireFormat::UInt16),
    (ValueId::FLIP_JOYSTICK, WireFormat::Bool),
    (ValueId::MAX_TURN_RATE, WireFormat::Float32),
    (ValueId::MIN_TURN_RATE, WireFormat::Float32),
    (ValueId::MAX_ANG_ACC, WireFormat::Float32),
    (ValueId::M10_ON, WireFormat::Bool),
    (ValueId::M11_ON, WireFormat::Bool),
    (ValueId::M12_ON, WireFormat::Bool),
    (ValueId::M13_ON, WireFormat::Bool),
    (ValueId::BATT_LO, WireFormat::Float32),
    (ValueId::BATT_HI, WireFormat::Float32),
    (ValueId::WHEEL_TRACK, WireFormat::Float32),
    (ValueId::WHEEL_GEAR_RATIO, WireFormat::Float32),
    (ValueId::WHEEL_RADIUS, WireFormat::Float32),
    (ValueId::PTO_CUR_DEV, WireFormat::UInt16),
    (ValueId::PTO_CUR_RPM, WireFormat::Float32),
    (ValueId::PTO_MIN_RPM, WireFormat::Float32),
    (ValueId::PTO_MAX_RPM, WireFormat::Float32),
    (ValueId::PTO_DEF_RPM, WireFormat::Float32),
    (ValueId::PTO_GEAR_RATIO, WireFormat::Float32),
    (ValueId::STEERING_GAMMA, WireFormat::Float32),
];

static REGISTRY: LazyLock<HashMap<ValueId, WireFormat>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(FORMAT_TABLE.len());
    for (id, format) in FORMAT_TABLE {
        if let Some(previous) = map.insert(*id, *format) {
            warn!(value_id = %id, ?previous, now = ?format, "duplicate wire format registration");
            // First registration wins, matching the catalog's stated intent.
            map.insert(*id, previous);
        }
    }
    map
});

/// Look up the wire format registered for `value_id`.
pub fn wire_format(value_id: ValueId) -> Result<WireFormat> {
    REGISTRY
        .get(&value_id)
        .copied()
        .ok_or(ProtocolError::UnregisteredValueId { value_id })
}

/// Whether `value_id` has a registered wire format.
pub fn is_registered(value_id: ValueId) -> bool {
    REGISTRY.contains_key(&value_id)
}

/// The registered table rows, for enumeration by callers and tests.
///
/// Rows appear in catalog order and include the duplicate id 84 entry.
pub fn entries() -> &'static [(ValueId, WireFormat)] {
    FORMAT_TABLE
}

/// Decode a 4-byte value payload per the format registered for its id.
pub fn decode_value(value_id: ValueId, payload: &[u8]) -> Result<Value> {
    let format = wire_format(value_id)?;
    if payload.len() != VALUE_PAYLOAD_LEN {
        return Err(ProtocolError::InvalidPayloadLength {
            value_id,
            expected: VALUE_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }

    Ok(match format {
        WireFormat::Int16 => Value::Int16(i16::from_le_bytes([payload[0], payload[1]])),
        WireFormat::UInt16 => Value::UInt16(u16::from_le_bytes([payload[0], payload[1]])),
        WireFormat::Float32 => {
            Value::Float32(f32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]))
        }
        WireFormat::Bool => Value::Bool(payload[0] != 0),
    })
}

/// Encode a value into the 4-byte payload its id is registered for.
///
/// Fails with [`ProtocolError::TypeMismatch`] if the tagged value does
/// not match the registered format.
pub fn encode_value(value_id: ValueId, value: Value) -> Result<[u8; VALUE_PAYLOAD_LEN]> {
    let format = wire_format(value_id)?;
    if value.wire_format() != format {
        return Err(ProtocolError::TypeMismatch { value_id, expected: format });
    }

    let mut payload = [0u8; VALUE_PAYLOAD_LEN];
    match value {
        Value::Int16(v) => payload[..2].copy_from_slice(&v.to_le_bytes()),
        Value::UInt16(v) => payload[..2].copy_from_slice(&v.to_le_bytes()),
        Value::Float32(v) => payload.copy_from_slice(&v.to_le_bytes()),
        Value::Bool(v) => payload[0] = u8::from(v),
    }
    Ok(payload)
}
