//! Four-channel motor RPM telemetry codec.
//!
//! One fixed 8-byte PDO-style packet carries a signed 16-bit RPM per
//! motor channel (A through D), little-endian, in channel order. The same
//! layout serves both the outgoing setpoint request and the measured
//! reply; only the arbitration base differs.

use crate::error::{ProtocolError, Result};
use std::time::{Duration, Instant};

/// Base arbitration id for RPM requests (RPDO2-style).
pub const COB_ID_RPM_REQUEST: u32 = 0x300;
/// Base arbitration id for measured RPM replies (TPDO2-style).
pub const COB_ID_RPM_REPLY: u32 = 0x280;

/// Total length of an RPM packet body.
pub const RPM_PACKET_LEN: usize = 8;

/// RPM readings for motor channels A through D.
///
/// Channel values are independent; the wire width is the only range
/// bound. The capture stamp is set at construction and backs the
/// caller's staleness checks; it never travels on the wire.
#[derive(Debug, Clone)]
pub struct MotorRpm {
    pub a_rpm: i16,
    pub b_rpm: i16,
    pub c_rpm: i16,
    pub d_rpm: i16,
    stamp: Instant,
}

impl MotorRpm {
    pub fn new(a_rpm: i16, b_rpm: i16, c_rpm: i16, d_rpm: i16) -> Self {
        Self { a_rpm, b_rpm, c_rpm, d_rpm, stamp: Instant::now() }
    }

    /// Checked construction from wider integers.
    ///
    /// A reading outside the signed 16-bit wire width fails with
    /// [`ProtocolError::RpmOutOfRange`] instead of wrapping, so an
    /// out-of-range setpoint cannot silently become a different RPM.
    pub fn try_new(a_rpm: i64, b_rpm: i64, c_rpm: i64, d_rpm: i64) -> Result<Self> {
        let check = |channel: char, value: i64| -> Result<i16> {
            i16::try_from(value).map_err(|_| ProtocolError::RpmOutOfRange { channel, value })
        };
        Ok(Self::new(
            check('A', a_rpm)?,
            check('B', b_rpm)?,
            check('C', c_rpm)?,
            check('D', d_rpm)?,
        ))
    }

    /// Monotonic capture time, stamped at construction.
    pub fn stamp(&self) -> Instant {
        self.stamp
    }

    /// Time elapsed since capture.
    pub fn age(&self) -> Duration {
        self.stamp.elapsed()
    }

    /// Encode the readings as an 8-byte packet body.
    pub fn encode(&self) -> [u8; RPM_PACKET_LEN] {
        let mut body = [0u8; RPM_PACKET_LEN];
        body[0..2].copy_from_slice(&self.a_rpm.to_le_bytes());
        body[2..4].copy_from_slice(&self.b_rpm.to_le_bytes());
        body[4..6].copy_from_slice(&self.c_rpm.to_le_bytes());
        body[6..8].copy_from_slice(&self.d_rpm.to_le_bytes());
        body
    }

    /// Decode an 8-byte packet body.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != RPM_PACKET_LEN {
            return Err(ProtocolError::malformed("rpm", RPM_PACKET_LEN, data.len()));
        }
        Ok(Self::new(
            i16::from_le_bytes([data[0], data[1]]),
            i16::from_le_bytes([data[2], data[3]]),
            i16::from_le_bytes([data[4], data[5]]),
            i16::from_le_bytes([data[6], data[7]]),
        ))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_is_little_endian_in_channel_order() {
        let rpm = MotorRpm::new(1, -1, 256, -256);
        assert_eq!(
            rpm.encode(),
            [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x01, 0x00, 0xFF]
        );
    }

    #[test]
    fn decode_rejects_wrong_lengths() {
        for len in [0usize, 7, 9] {
            let data = vec![0u8; len];
            let err = MotorRpm::decode(&data).unwrap_err();
            assert_eq!(
                err,
                ProtocolError::MalformedPacket { packet: "rpm", expected: RPM_PACKET_LEN, actual: len }
            );
        }
    }

    #[test]
    fn extreme_in_range_readings_survive() {
        let rpm = MotorRpm::new(i16::MIN, i16::MAX, 0, -1);
        let decoded = MotorRpm::decode(&rpm.encode()).unwrap();
        assert_eq!(decoded.a_rpm, i16::MIN);
        assert_eq!(decoded.b_rpm, i16::MAX);
        assert_eq!(decoded.c_rpm, 0);
        assert_eq!(decoded.d_rpm, -1);
    }

    #[test]
    fn out_of_range_readings_are_rejected_not_wrapped() {
        let err = MotorRpm::try_new(0, 40_000, 0, 0).unwrap_err();
        assert_eq!(err, ProtocolError::RpmOutOfRange { channel: 'B', value: 40_000 });

        let err = MotorRpm::try_new(0, 0, 0, -40_000).unwrap_err();
        assert_eq!(err, ProtocolError::RpmOutOfRange { channel: 'D', value: -40_000 });

        let ok = MotorRpm::try_new(-32768, 32767, 0, 1).unwrap();
        assert_eq!(ok.a_rpm, i16::MIN);
        assert_eq!(ok.b_rpm, i16::MAX);
    }

    proptest! {
        #[test]
        fn prop_readings_round_trip(
            a in any::<i16>(),
            b in any::<i16>(),
            c in any::<i16>(),
            d in any::<i16>()
        ) {
            let decoded = MotorRpm::decode(&MotorRpm::new(a, b, c, d).encode()).unwrap();
            prop_assert_eq!(decoded.a_rpm, a);
            prop_assert_eq!(decoded.b_rpm, b);
            prop_assert_eq!(decoded.c_rpm, c);
            prop_assert_eq!(decoded.d_rpm, d);
        }
    }
}
