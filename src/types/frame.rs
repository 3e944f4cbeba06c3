//! Raw CAN frame handed to the transport layer.

use serde::{Deserialize, Serialize};

/// An addressed CAN frame ready for transmission.
///
/// The arbitration id is an opaque integer here; base-address and node-id
/// composition happens in the codec builders, and any validation against
/// the bus (standard vs. extended ids, DLC limits) belongs to the driver
/// that owns the socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanFrame {
    /// Arbitration id, already combined with the destination node.
    pub id: u32,
    /// Frame data bytes.
    pub data: Vec<u8>,
}

impl CanFrame {
    pub fn new(id: u32, data: impl Into<Vec<u8>>) -> Self {
        Self { id, data: data.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_keeps_id_and_data_verbatim() {
        let frame = CanFrame::new(0x60E, [1u8, 2, 3]);
        assert_eq!(frame.id, 0x60E);
        assert_eq!(frame.data, vec![1, 2, 3]);
    }
}
