//! Core types for the supervisor protocol and telemetry packets.
//!
//! - [`ValueId`] / [`WireFormat`] / [`Value`] describe what a supervisor
//!   value is and how it lays out inside its fixed 4-byte payload
//! - [`CanFrame`] is the opaque-id carrier handed to the transport layer
//! - [`Vec2`] is the normalized joystick deflection used by the control
//!   loop that feeds the codecs

mod frame;
mod joystick;
mod value;

pub use frame::CanFrame;
pub use joystick::Vec2;
pub use value::{VALUE_PAYLOAD_LEN, Value, ValueId, WireFormat};
