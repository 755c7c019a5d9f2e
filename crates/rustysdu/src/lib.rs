//! RustySDU - L2CAP SDU frame parsing for Bluetooth test transports
//!
//! This library decodes single L2CAP SDU frames as they arrive over a serial
//! or test transport, exposes their header fields and payload, and computes
//! the trailing Frame Check Sequence so frames can be verified or built.
//! Reassembling several SDUs into an L2CAP packet is left to the caller.

pub mod l2cap;

// Re-export common types for convenience
pub use l2cap::{
    calculate_fcs, FrameStatus, HeaderOffset, L2capControlField, Sar, SduError, SduFrame,
    SduResult,
};
