//! Async pacing utilities for packet-driven loops.

mod cadence;

pub use cadence::Cadence;
