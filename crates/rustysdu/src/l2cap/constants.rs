//! L2CAP SDU constants
//!
//! Field offsets, header sizes and control field bit layout used when
//! decoding SDU frames.

// SDU field offsets (all fields are little endian u16)
pub const SDU_TOTAL_LENGTH_OFFSET: usize = 0;
pub const SDU_CHANNEL_ID_OFFSET: usize = 2;
pub const SDU_TOTAL_L2CAP_LENGTH_OFFSET: usize = 4;
pub const SDU_CONTROL_OFFSET: usize = 6;

/// Size of every fixed u16 field
pub const SDU_FIELD_SIZE: usize = 2;

/// Size of the trailing Frame Check Sequence
pub const SDU_FCS_SIZE: usize = 2;

// Header sizes preceding the information payload
pub const SDU_CONTINUATION_HEADER_SIZE: usize = 6;
pub const SDU_FIRST_HEADER_SIZE: usize = 8;

/// Smallest well formed SDU: four u16 header fields plus the FCS
pub const SDU_MIN_SIZE: usize = SDU_FIRST_HEADER_SIZE + SDU_FCS_SIZE;

// Frame Check Sequence
pub const FCS_INITIAL_VALUE: u16 = 0x0000;

// Enhanced control field
pub const L2CAP_CTRL_FRAME_TYPE_MASK: u16 = 0x0001;
pub const L2CAP_CTRL_TXSEQ_MASK: u16 = 0x007E;
pub const L2CAP_CTRL_TXSEQ_SHIFT: u16 = 1;
pub const L2CAP_CTRL_SUPERVISORY_MASK: u16 = 0x000C;
pub const L2CAP_CTRL_SUPERVISORY_SHIFT: u16 = 2;
pub const L2CAP_CTRL_POLL: u16 = 0x0010;
pub const L2CAP_CTRL_FINAL: u16 = 0x0080;
pub const L2CAP_CTRL_REQSEQ_MASK: u16 = 0x3F00;
pub const L2CAP_CTRL_REQSEQ_SHIFT: u16 = 8;
pub const L2CAP_CTRL_SAR_MASK: u16 = 0xC000;
pub const L2CAP_CTRL_SAR_SHIFT: u16 = 14;

/// Sequence numbers wrap at 64 (6 bit TxSeq/ReqSeq)
pub const L2CAP_SEQ_MODULO: u8 = 64;

// Supervisory functions (S-frames)
pub const L2CAP_SUPER_RR: u8 = 0x00;
pub const L2CAP_SUPER_REJ: u8 = 0x01;
pub const L2CAP_SUPER_RNR: u8 = 0x02;
pub const L2CAP_SUPER_SREJ: u8 = 0x03;
