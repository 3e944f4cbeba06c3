//! Packet codecs for the two message kinds on the bus.
//!
//! Both codecs are pure and stateless: fixed-layout little-endian bodies
//! in, typed messages out, and the reverse. Frame transmission and
//! arbitration belong to the transport layer; the only addressing done
//! here is composing a base id with a node id in the supervisor frame
//! builder.
//!
//! | Packet     | Length | Module         |
//! |------------|--------|----------------|
//! | Supervisor | 8      | [`supervisor`] |
//! | Motor RPM  | 8      | [`rpm`]        |

pub mod rpm;
pub mod supervisor;

pub use rpm::{COB_ID_RPM_REPLY, COB_ID_RPM_REQUEST, MotorRpm, RPM_PACKET_LEN};
pub use supervisor::{
    COB_ID_REPLY, COB_ID_REQUEST, Direction, OpByte, OperationId, SUPERVISOR_PACKET_LEN,
    SupervisorMessage, supervisor_frame,
};
