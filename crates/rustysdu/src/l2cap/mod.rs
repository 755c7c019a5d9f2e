//! L2CAP SDU framing
//!
//! This module provides the pieces a reassembler needs to consume SDU frames:
//! - Decoding the fixed little endian header fields of an SDU
//! - Locating the information payload for first and continuation SDUs
//! - Calculating and verifying the 16 bit Frame Check Sequence
//! - Decoding the enhanced control field (SAR bits, TxSeq/ReqSeq)

pub mod constants;
pub mod types;
pub mod fcs;
pub mod control;
pub mod sdu;

// Re-export the public API
pub use self::types::*;
pub use self::fcs::{calculate_fcs, Fcs, FCS_TABLE};
pub use self::control::{L2capControlField, Sar};
pub use self::sdu::SduFrame;
