//! Type-safe codecs for a CAN supervisor protocol and motor telemetry.
//!
//! Drawbar is the packet layer of a vehicle control stack: it encodes and
//! decodes the fixed-layout CAN bodies the vehicle's supervisor node
//! speaks, and nothing else. Frame transmission, bus arbitration and the
//! control loop live in the transport layer that consumes this crate.
//!
//! # Features
//!
//! - **Supervisor protocol**: SDO-style request/reply for reading,
//!   writing and storing named configuration values
//! - **Motor telemetry**: PDO-style four-channel RPM packets
//! - **Value registry**: immutable id-to-wire-format table with typed
//!   decode/encode of the 4-byte value payloads
//! - **Pacing**: a drift-free periodic [`Timer`] and its async
//!   [`Cadence`](stream::Cadence) counterpart for the control loop
//!
//! # Quick start
//!
//! Build a write request for the supervisor node and decode its body the
//! way the receiving side would:
//!
//! ```rust
//! use drawbar::codec::{Direction, OperationId, SupervisorMessage, supervisor_frame};
//! use drawbar::{Value, ValueId, registry};
//!
//! # fn main() -> drawbar::Result<()> {
//! let payload = registry::encode_value(ValueId::MAX_SPEED_LEVEL, Value::UInt16(1500))?;
//! let frame = supervisor_frame(
//!     Direction::Request,
//!     OperationId::Write,
//!     ValueId::MAX_SPEED_LEVEL,
//!     0x0E,
//!     payload,
//! )?;
//! assert_eq!(frame.id, 0x60E);
//!
//! let request = SupervisorMessage::decode(&frame.data)?;
//! assert_eq!(request.operation(), Some(OperationId::Write));
//! assert_eq!(
//!     registry::decode_value(request.value_id, &request.payload)?,
//!     Value::UInt16(1500),
//! );
//! # Ok(())
//! # }
//! ```

pub mod codec;
mod error;
pub mod registry;
pub mod stream;
mod timer;
pub mod types;

// Core exports
pub use error::{ProtocolError, Result};
pub use timer::Timer;
pub use types::*;

// Codec exports
pub use codec::{MotorRpm, OperationId, SupervisorMessage};
