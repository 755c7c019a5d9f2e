//! L2CAP control field handling
//!
//! Every SDU carries a 16 bit enhanced control field directly after its
//! fixed header. It is consumed by the reassembler and never becomes part of
//! the reassembled L2CAP payload.

use super::constants::*;
use super::types::*;
use byteorder::{LittleEndian, ReadBytesExt};
use std::convert::TryFrom;
use std::io::Cursor;

/// Segmentation and Reassembly bits of an I-frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sar {
    /// Complete SDU in a single frame
    Unsegmented = 0,
    /// First segment, carries the total SDU length
    Start = 1,
    /// Last segment
    End = 2,
    /// Segment between start and end
    Continuation = 3,
}

impl TryFrom<u8> for Sar {
    type Error = SduError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unsegmented),
            1 => Ok(Self::Start),
            2 => Ok(Self::End),
            3 => Ok(Self::Continuation),
            _ => Err(SduError::InvalidControl(format!(
                "Invalid SAR value: {}",
                value
            ))),
        }
    }
}

/// L2CAP Control field for enhanced retransmission/streaming modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L2capControlField {
    /// Frame type (false = I-frame, true = S-frame)
    pub frame_type: bool,
    /// TxSeq number (I-frames only)
    pub tx_seq: u8,
    /// Segmentation and Reassembly bits (I-frames only)
    pub sar: Sar,
    /// Supervisory function (S-frames only)
    pub supervisory_function: u8,
    /// Poll bit (S-frames only)
    pub poll: bool,
    /// Final bit
    pub final_bit: bool,
    /// ReqSeq number (Acknowledge messages up to this sequence)
    pub req_seq: u8,
}

fn check_seq(name: &str, seq: u8) -> SduResult<()> {
    if seq >= L2CAP_SEQ_MODULO {
        return Err(SduError::InvalidControl(format!(
            "{} out of range: {}",
            name, seq
        )));
    }
    Ok(())
}

impl L2capControlField {
    /// Create a new control field for an Information frame (I-frame)
    pub fn new_i_frame(tx_seq: u8, req_seq: u8, final_bit: bool, sar: Sar) -> SduResult<Self> {
        check_seq("TxSeq", tx_seq)?;
        check_seq("ReqSeq", req_seq)?;

        Ok(Self {
            frame_type: false,
            tx_seq,
            sar,
            supervisory_function: 0,
            poll: false,
            final_bit,
            req_seq,
        })
    }

    /// Create a new control field for a Supervisory frame (S-frame)
    pub fn new_s_frame(
        supervisory_function: u8,
        req_seq: u8,
        poll: bool,
        final_bit: bool,
    ) -> SduResult<Self> {
        if supervisory_function > L2CAP_SUPER_SREJ {
            return Err(SduError::InvalidControl(format!(
                "Invalid supervisory function: {}",
                supervisory_function
            )));
        }
        check_seq("ReqSeq", req_seq)?;

        Ok(Self {
            frame_type: true,
            tx_seq: 0,
            sar: Sar::Unsegmented,
            supervisory_function,
            poll,
            final_bit,
            req_seq,
        })
    }

    /// Whether this is an Information frame
    pub fn is_i_frame(&self) -> bool {
        !self.frame_type
    }

    /// Parse the control field from raw little endian bytes
    pub fn parse(data: &[u8]) -> SduResult<Self> {
        let mut cursor = Cursor::new(data);
        let control = cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| SduError::TruncatedFrame {
                needed: SDU_FIELD_SIZE,
                actual: data.len(),
            })?;

        Ok(Self::from(control))
    }

    /// Convert the control field to a u16 value
    pub fn to_u16(&self) -> u16 {
        let mut control: u16 = 0;

        if self.frame_type {
            control |= L2CAP_CTRL_FRAME_TYPE_MASK;
            control |= ((self.supervisory_function as u16) << L2CAP_CTRL_SUPERVISORY_SHIFT)
                & L2CAP_CTRL_SUPERVISORY_MASK;

            if self.poll {
                control |= L2CAP_CTRL_POLL;
            }
        } else {
            control |= ((self.tx_seq as u16) << L2CAP_CTRL_TXSEQ_SHIFT) & L2CAP_CTRL_TXSEQ_MASK;
            control |= (self.sar as u16) << L2CAP_CTRL_SAR_SHIFT;
        }

        if self.final_bit {
            control |= L2CAP_CTRL_FINAL;
        }

        control |= ((self.req_seq as u16) << L2CAP_CTRL_REQSEQ_SHIFT) & L2CAP_CTRL_REQSEQ_MASK;

        control
    }

    /// Serialize the control field to bytes
    pub fn to_bytes(&self) -> [u8; 2] {
        self.to_u16().to_le_bytes()
    }
}

impl From<u16> for L2capControlField {
    fn from(control: u16) -> Self {
        let frame_type = (control & L2CAP_CTRL_FRAME_TYPE_MASK) != 0;

        let supervisory_function = if frame_type {
            ((control & L2CAP_CTRL_SUPERVISORY_MASK) >> L2CAP_CTRL_SUPERVISORY_SHIFT) as u8
        } else {
            0
        };

        let tx_seq = if !frame_type {
            ((control & L2CAP_CTRL_TXSEQ_MASK) >> L2CAP_CTRL_TXSEQ_SHIFT) as u8
        } else {
            0
        };

        // The masked SAR field is two bits wide, so every value decodes
        let sar = if !frame_type {
            Sar::try_from(((control & L2CAP_CTRL_SAR_MASK) >> L2CAP_CTRL_SAR_SHIFT) as u8)
                .unwrap_or(Sar::Unsegmented)
        } else {
            Sar::Unsegmented
        };

        let req_seq = ((control & L2CAP_CTRL_REQSEQ_MASK) >> L2CAP_CTRL_REQSEQ_SHIFT) as u8;

        Self {
            frame_type,
            tx_seq,
            sar,
            supervisory_function,
            poll: frame_type && (control & L2CAP_CTRL_POLL) != 0,
            final_bit: (control & L2CAP_CTRL_FINAL) != 0,
            req_seq,
        }
    }
}

impl From<L2capControlField> for u16 {
    fn from(field: L2capControlField) -> Self {
        field.to_u16()
    }
}
