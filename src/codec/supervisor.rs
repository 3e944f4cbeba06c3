//! Request/reply codec for the supervisor protocol.
//!
//! An SDO-style exchange: the control layer sends a request naming an
//! operation and a value id, the supervisor node answers with the same
//! layout plus a success flag. Both directions share one fixed 8-byte
//! body:
//!
//! ```text
//! byte 0      operation (low 7 bits) | success flag (bit 7)
//! bytes 1-2   value id, u16 little-endian
//! byte 3      pad
//! bytes 4-7   value payload (4 bytes, see the registry for layout)
//! ```
//!
//! The success bit steals bit 7 of the operation byte, so operation codes
//! are confined to 7 bits; encoding a code >= 0x80 fails with
//! [`ProtocolError::InvalidOperation`]. Pack/unpack of that byte lives in
//! [`OpByte`] and nowhere else.

use crate::error::{ProtocolError, Result};
use crate::types::{CanFrame, VALUE_PAYLOAD_LEN, ValueId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::trace;

/// Base arbitration id for outgoing requests (SDO command id).
pub const COB_ID_REQUEST: u32 = 0x600;
/// Base arbitration id for incoming replies (SDO reply id).
pub const COB_ID_REPLY: u32 = 0x580;

/// Total length of a supervisor packet body.
pub const SUPERVISOR_PACKET_LEN: usize = 8;

/// Operation requested on a value id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperationId {
    Nop = 0,
    /// Read the current value.
    Read = 1,
    /// Write the value into the supervisor's RAM.
    Write = 2,
    /// Persist the value to non-volatile storage.
    Store = 3,
}

impl OperationId {
    /// Map a raw wire code to a known operation.
    pub const fn from_raw(code: u8) -> Option<Self> {
        match code {
            0 => Some(OperationId::Nop),
            1 => Some(OperationId::Read),
            2 => Some(OperationId::Write),
            3 => Some(OperationId::Store),
            _ => None,
        }
    }
}

impl From<OperationId> for u8 {
    fn from(op: OperationId) -> u8 {
        op as u8
    }
}

/// Packed first byte of a supervisor packet.
///
/// Wraps the raw byte so the flag/operation split is spelled out in one
/// place rather than as bit arithmetic at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpByte(pub u8);

impl OpByte {
    const SUCCESS_BIT: u8 = 0x80;

    /// Pack an operation code and success flag into the wire byte.
    ///
    /// Fails if the code itself already uses bit 7.
    pub fn pack(op: u8, success: bool) -> Result<Self> {
        if op & Self::SUCCESS_BIT != 0 {
            return Err(ProtocolError::InvalidOperation { code: op });
        }
        Ok(Self(op | if success { Self::SUCCESS_BIT } else { 0 }))
    }

    /// The operation code, low 7 bits.
    pub const fn operation(&self) -> u8 {
        self.0 & !Self::SUCCESS_BIT
    }

    /// The success flag, bit 7. Meaningful on replies only.
    pub const fn success(&self) -> bool {
        self.0 & Self::SUCCESS_BIT != 0
    }
}

/// One supervisor request or reply.
///
/// The capture stamp is set at construction (encode and decode paths
/// alike), never travels on the wire, and exists so the caller can order
/// and age messages locally.
#[derive(Debug, Clone)]
pub struct SupervisorMessage {
    /// Raw operation code; the wire reserves 7 bits for it, so unknown
    /// codes survive a decode and [`Self::operation`] reports `None`.
    pub op: u8,
    pub value_id: ValueId,
    /// Success flag; meaningful on replies, always false on requests.
    pub success: bool,
    /// Opaque value payload; interpretation belongs to the registry.
    pub payload: [u8; VALUE_PAYLOAD_LEN],
    stamp: Instant,
}

impl SupervisorMessage {
    /// Build a request. Requests never carry a success flag.
    pub fn request(op: OperationId, value_id: ValueId, payload: [u8; VALUE_PAYLOAD_LEN]) -> Self {
        Self::from_raw(op.into(), value_id, false, payload)
    }

    /// Build a reply with the given success flag.
    pub fn reply(
        op: OperationId,
        value_id: ValueId,
        success: bool,
        payload: [u8; VALUE_PAYLOAD_LEN],
    ) -> Self {
        Self::from_raw(op.into(), value_id, success, payload)
    }

    /// Build a message from a raw operation code.
    ///
    /// Codes >= 0x80 are representable here but rejected by
    /// [`Self::encode`]; this mirrors the wire, where only 7 bits exist.
    pub fn from_raw(
        op: u8,
        value_id: ValueId,
        success: bool,
        payload: [u8; VALUE_PAYLOAD_LEN],
    ) -> Self {
        Self { op, value_id, success, payload, stamp: Instant::now() }
    }

    /// The known operation, if the raw code is one.
    pub fn operation(&self) -> Option<OperationId> {
        OperationId::from_raw(self.op)
    }

    /// Monotonic capture time, stamped at construction.
    pub fn stamp(&self) -> Instant {
        self.stamp
    }

    /// Encode the message as an 8-byte packet body.
    pub fn encode(&self) -> Result<[u8; SUPERVISOR_PACKET_LEN]> {
        let op_byte = OpByte::pack(self.op, self.success)?;

        let mut body = [0u8; SUPERVISOR_PACKET_LEN];
        body[0] = op_byte.0;
        body[1..3].copy_from_slice(&self.value_id.0.to_le_bytes());
        // body[3] stays zero: pad
        body[4..].copy_from_slice(&self.payload);

        trace!(op = self.op, value_id = %self.value_id, "encoded supervisor packet");
        Ok(body)
    }

    /// Decode an 8-byte packet body.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != SUPERVISOR_PACKET_LEN {
            return Err(ProtocolError::malformed(
                "supervisor",
                SUPERVISOR_PACKET_LEN,
                data.len(),
            ));
        }

        let op_byte = OpByte(data[0]);
        let value_id = ValueId(u16::from_le_bytes([data[1], data[2]]));
        // data[3] is pad
        let mut payload = [0u8; VALUE_PAYLOAD_LEN];
        payload.copy_from_slice(&data[4..]);

        Ok(Self::from_raw(op_byte.operation(), value_id, op_byte.success(), payload))
    }
}

/// Direction of a supervisor frame, selecting its base arbitration id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Control layer to supervisor, base [`COB_ID_REQUEST`].
    Request,
    /// Supervisor to control layer, base [`COB_ID_REPLY`].
    Reply,
}

impl Direction {
    const fn base_id(self) -> u32 {
        match self {
            Direction::Request => COB_ID_REQUEST,
            Direction::Reply => COB_ID_REPLY,
        }
    }
}

/// Build a ready-to-send supervisor frame.
///
/// The arbitration id is the direction's base OR-ed with the node id;
/// both are treated as opaque integers here. This is the only place where
/// addressing and packet body meet, and it has no side effects.
pub fn supervisor_frame(
    direction: Direction,
    op: OperationId,
    value_id: ValueId,
    node_id: u8,
    payload: [u8; VALUE_PAYLOAD_LEN],
) -> Result<CanFrame> {
    let body = SupervisorMessage::request(op, value_id, payload).encode()?;
    Ok(CanFrame::new(direction.base_id() | u32::from(node_id), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn read_with_success_packs_to_0x81() {
        let byte = OpByte::pack(OperationId::Read.into(), true).unwrap();
        assert_eq!(byte.0, 0x81);

        let byte = OpByte(0x81);
        assert_eq!(byte.operation(), 1);
        assert!(byte.success());
    }

    #[test]
    fn operation_codes_above_seven_bits_are_rejected() {
        let err = OpByte::pack(0x80, false).unwrap_err();
        assert_eq!(err, ProtocolError::InvalidOperation { code: 0x80 });

        let msg = SupervisorMessage::from_raw(0xC8, ValueId::NOP, false, [0; 4]);
        assert!(matches!(msg.encode(), Err(ProtocolError::InvalidOperation { code: 0xC8 })));
    }

    #[test]
    fn encode_lays_out_the_documented_bytes() {
        let msg = SupervisorMessage::reply(
            OperationId::Read,
            ValueId::MAX_SPEED_LEVEL,
            true,
            [0xDC, 0x05, 0x00, 0x00],
        );
        let body = msg.encode().unwrap();
        assert_eq!(body, [0x81, 0x0A, 0x00, 0x00, 0xDC, 0x05, 0x00, 0x00]);
    }

    #[test]
    fn decode_rejects_wrong_lengths() {
        for len in [0usize, 7, 9, 64] {
            let data = vec![0u8; len];
            let err = SupervisorMessage::decode(&data).unwrap_err();
            assert_eq!(
                err,
                ProtocolError::MalformedPacket {
                    packet: "supervisor",
                    expected: SUPERVISOR_PACKET_LEN,
                    actual: len,
                }
            );
        }
    }

    #[test]
    fn decode_keeps_unknown_operation_codes_raw() {
        let mut body = [0u8; SUPERVISOR_PACKET_LEN];
        body[0] = 0x7F;
        let msg = SupervisorMessage::decode(&body).unwrap();
        assert_eq!(msg.op, 0x7F);
        assert_eq!(msg.operation(), None);
        assert!(!msg.success);
    }

    #[test]
    fn request_frame_targets_the_request_base() {
        let frame = supervisor_frame(
            Direction::Request,
            OperationId::Write,
            ValueId::MAX_SPEED_LEVEL,
            0x0E,
            [0xDC, 0x05, 0x00, 0x00],
        )
        .unwrap();
        assert_eq!(frame.id, 0x60E);
        assert_eq!(frame.data, vec![0x02, 0x0A, 0x00, 0x00, 0xDC, 0x05, 0x00, 0x00]);
    }

    #[test]
    fn reply_frame_targets_the_reply_base() {
        let frame = supervisor_frame(
            Direction::Reply,
            OperationId::Read,
            ValueId::BATT_LO,
            0x0E,
            [0; 4],
        )
        .unwrap();
        assert_eq!(frame.id, 0x58E);
    }

    #[test]
    fn known_operations_map_both_ways() {
        for op in [OperationId::Nop, OperationId::Read, OperationId::Write, OperationId::Store] {
            assert_eq!(OperationId::from_raw(op.into()), Some(op));
        }
        assert_eq!(OperationId::from_raw(4), None);
        assert_eq!(OperationId::from_raw(0x7F), None);
    }

    proptest! {
        #[test]
        fn prop_packets_round_trip(
            op in 0u8..0x80,
            raw_id in any::<u16>(),
            success in any::<bool>(),
            payload in any::<[u8; 4]>()
        ) {
            let msg = SupervisorMessage::from_raw(op, ValueId(raw_id), success, payload);
            let decoded = SupervisorMessage::decode(&msg.encode().unwrap()).unwrap();
            prop_assert_eq!(decoded.op, op);
            prop_assert_eq!(decoded.value_id, ValueId(raw_id));
            prop_assert_eq!(decoded.success, success);
            prop_assert_eq!(decoded.payload, payload);
        }

        #[test]
        fn prop_op_byte_split_is_lossless(op in 0u8..0x80, success in any::<bool>()) {
            let byte = OpByte::pack(op, success).unwrap();
            prop_assert_eq!(byte.operation(), op);
            prop_assert_eq!(byte.success(), success);
        }
    }
}
