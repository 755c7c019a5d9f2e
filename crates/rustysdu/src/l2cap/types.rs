//! Type definitions for SDU operations
//!
//! This module contains the error type and the small value types shared by
//! the SDU frame and its callers.

use super::constants::*;
use super::control::Sar;
use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;

/// Error types specific to SDU frame operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SduError {
    #[error("Truncated frame: need {needed} bytes, have {actual}")]
    TruncatedFrame { needed: usize, actual: usize },

    #[error("FCS mismatch: frame carries {expected:#06x}, calculated {calculated:#06x}")]
    ChecksumMismatch { expected: u16, calculated: u16 },

    #[error("Invalid header offset: {0}")]
    InvalidOffset(usize),

    #[error("Invalid control field: {0}")]
    InvalidControl(String),

    #[error("Payload too large for a 16 bit length field: {0} bytes")]
    PayloadTooLarge(usize),
}

/// Result type for SDU operations
pub type SduResult<T> = std::result::Result<T, SduError>;

/// Number of header bytes preceding the information payload of an SDU.
///
/// The first SDU of a stream carries two extra bytes compared to the SDUs
/// that follow it, so the payload starts further into the frame. The frame
/// itself cannot tell which one it is; the reassembler knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderOffset {
    /// Any SDU after the first one of a stream
    Continuation,
    /// The first SDU of a stream
    First,
}

impl HeaderOffset {
    /// Header size in bytes
    pub fn size(self) -> usize {
        match self {
            Self::Continuation => SDU_CONTINUATION_HEADER_SIZE,
            Self::First => SDU_FIRST_HEADER_SIZE,
        }
    }

    /// Header offset for an SDU carrying the given SAR bits
    ///
    /// Unsegmented and start SDUs open a stream and carry the total L2CAP
    /// length.
    pub fn for_sar(sar: Sar) -> Self {
        match sar {
            Sar::Unsegmented | Sar::Start => Self::First,
            Sar::Continuation | Sar::End => Self::Continuation,
        }
    }
}

impl TryFrom<usize> for HeaderOffset {
    type Error = SduError;

    fn try_from(offset: usize) -> Result<Self, Self::Error> {
        match offset {
            SDU_CONTINUATION_HEADER_SIZE => Ok(Self::Continuation),
            SDU_FIRST_HEADER_SIZE => Ok(Self::First),
            other => Err(SduError::InvalidOffset(other)),
        }
    }
}

impl From<HeaderOffset> for usize {
    fn from(offset: HeaderOffset) -> Self {
        offset.size()
    }
}

/// Integrity state of a frame, resolved on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Stored FCS matches the calculated one
    Valid,
    /// Stored FCS differs from the calculated one
    Corrupt,
    /// Too short to hold the fixed header and FCS
    Malformed,
}

impl fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "Valid"),
            Self::Corrupt => write!(f, "Corrupt (FCS mismatch)"),
            Self::Malformed => write!(f, "Malformed (truncated frame)"),
        }
    }
}
