//! Error types for the packet codec layer.
//!
//! All failures in this crate are local and synchronous: a packet or value
//! either decodes completely or fails with one of the variants below, and
//! nothing is retried internally. Retry policy, if any, belongs to the
//! transport layer that owns the bus.

use crate::types::{ValueId, WireFormat};
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Main error type for encode/decode operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProtocolError {
    /// The value id has no entry in the wire-format registry. The caller
    /// must treat the value as unsupported rather than guess a format.
    #[error("value id {value_id} has no registered wire format")]
    UnregisteredValueId { value_id: ValueId },

    /// A value payload was not exactly the fixed 4-byte width.
    #[error("value payload for {value_id} must be {expected} bytes, got {actual}")]
    InvalidPayloadLength { value_id: ValueId, expected: usize, actual: usize },

    /// A packet body had the wrong overall length for its message kind.
    #[error("malformed {packet} packet: expected {expected} bytes, got {actual}")]
    MalformedPacket { packet: &'static str, expected: usize, actual: usize },

    /// An operation code does not fit the 7 bits reserved for it on the
    /// wire (bit 7 carries the success flag).
    #[error("operation code {code:#04x} does not fit in 7 bits")]
    InvalidOperation { code: u8 },

    /// A tagged value did not match the format registered for its id.
    #[error("value for {value_id} must encode as {expected:?}")]
    TypeMismatch { value_id: ValueId, expected: WireFormat },

    /// An RPM reading exceeds the signed 16-bit wire width. Rejected
    /// rather than wrapped so a wild reading cannot masquerade as a sane
    /// one.
    #[error("rpm for motor {channel} out of range: {value}")]
    RpmOutOfRange { channel: char, value: i64 },
}

impl ProtocolError {
    /// Helper constructor for frame-length mismatches.
    pub fn malformed(packet: &'static str, expected: usize, actual: usize) -> Self {
        ProtocolError::MalformedPacket { packet, expected, actual }
    }
}
