//! L2CAP SDU frames
//!
//! An SDU frame carries one fragment of an L2CAP payload. Its layout is:
//!
//! ```text
//! | total length | channel id | total L2CAP length | control | payload ... | FCS |
//! |   2 bytes    |  2 bytes   |      2 bytes       | 2 bytes |  n bytes    |  2  |
//! ```
//!
//! All fields are little endian. The FCS covers every byte before it. How
//! many header bytes precede the payload depends on the frame's position in
//! its stream, which only the caller knows, so payload accessors take a
//! [`HeaderOffset`].

use super::constants::*;
use super::control::L2capControlField;
use super::fcs::calculate_fcs;
use super::types::*;
use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace, warn};
use std::convert::TryFrom;
use std::fmt;
use std::io::Cursor;
use std::ops::Range;

/// A single SDU frame, owning its bytes
///
/// Construction never validates; each accessor checks that the bytes it
/// needs are present and fails with [`SduError::TruncatedFrame`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SduFrame {
    sdu_data: Vec<u8>,
}

impl SduFrame {
    /// Wrap received bytes, trailing FCS included
    pub fn new(sdu_data: Vec<u8>) -> Self {
        Self { sdu_data }
    }

    /// Append a freshly calculated FCS to `sdu_data` and wrap the result
    pub fn build(mut sdu_data: Vec<u8>) -> Self {
        let fcs = calculate_fcs(&sdu_data);
        sdu_data.extend_from_slice(&fcs.to_le_bytes());

        debug!("Built SDU of {} bytes with FCS {:#06x}", sdu_data.len(), fcs);

        Self { sdu_data }
    }

    /// Lay out the first SDU of a stream and append its FCS
    ///
    /// The total length field is filled in from the size of `information`
    /// plus the control and FCS fields.
    pub fn compose(
        channel_id: u16,
        total_l2cap_length: u16,
        control: impl Into<u16>,
        information: &[u8],
    ) -> SduResult<Self> {
        let control: u16 = control.into();
        let total_length = u16::try_from(SDU_FIELD_SIZE + information.len() + SDU_FCS_SIZE)
            .map_err(|_| SduError::PayloadTooLarge(information.len()))?;

        let mut sdu_data =
            Vec::with_capacity(SDU_FIRST_HEADER_SIZE + information.len() + SDU_FCS_SIZE);
        sdu_data.extend_from_slice(&total_length.to_le_bytes());
        sdu_data.extend_from_slice(&channel_id.to_le_bytes());
        sdu_data.extend_from_slice(&total_l2cap_length.to_le_bytes());
        sdu_data.extend_from_slice(&control.to_le_bytes());
        sdu_data.extend_from_slice(information);

        Ok(Self::build(sdu_data))
    }

    fn truncated(&self, needed: usize) -> SduError {
        trace!(
            "SDU too short: need {} bytes, have {} ({})",
            needed,
            self.sdu_data.len(),
            hex::encode(&self.sdu_data)
        );

        SduError::TruncatedFrame {
            needed,
            actual: self.sdu_data.len(),
        }
    }

    fn read_u16_at(&self, offset: usize) -> SduResult<u16> {
        let needed = offset + SDU_FIELD_SIZE;
        let field = self
            .sdu_data
            .get(offset..needed)
            .ok_or_else(|| self.truncated(needed))?;

        let mut cursor = Cursor::new(field);
        cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| self.truncated(needed))
    }

    /// Length of everything following the total length and channel id fields
    pub fn total_length(&self) -> SduResult<u16> {
        self.read_u16_at(SDU_TOTAL_LENGTH_OFFSET)
    }

    /// Channel identifier, shared by every SDU of a stream
    pub fn channel_id(&self) -> SduResult<u16> {
        self.read_u16_at(SDU_CHANNEL_ID_OFFSET)
    }

    /// Length of the fully reassembled L2CAP information payload
    pub fn total_l2cap_length(&self) -> SduResult<u16> {
        self.read_u16_at(SDU_TOTAL_L2CAP_LENGTH_OFFSET)
    }

    /// Raw control bytes (SAR bits, TxSeq and ReqSeq)
    pub fn controls(&self) -> SduResult<u16> {
        self.read_u16_at(SDU_CONTROL_OFFSET)
    }

    /// Control bytes decoded into their fields
    pub fn control_field(&self) -> SduResult<L2capControlField> {
        self.controls().map(L2capControlField::from)
    }

    /// Size of the whole frame in bytes
    pub fn size(&self) -> usize {
        self.sdu_data.len()
    }

    /// Index of the first payload byte
    pub fn payload_begin(&self, offset: HeaderOffset) -> SduResult<usize> {
        let begin = offset.size();
        if self.sdu_data.len() < begin + SDU_FCS_SIZE {
            return Err(self.truncated(begin + SDU_FCS_SIZE));
        }
        Ok(begin)
    }

    /// Index one past the last payload byte; always excludes the FCS
    pub fn payload_end(&self) -> SduResult<usize> {
        self.sdu_data
            .len()
            .checked_sub(SDU_FCS_SIZE)
            .ok_or_else(|| self.truncated(SDU_FCS_SIZE))
    }

    /// Bounds of the information payload within the frame
    pub fn payload_range(&self, offset: HeaderOffset) -> SduResult<Range<usize>> {
        Ok(self.payload_begin(offset)?..self.payload_end()?)
    }

    /// Information payload bytes
    pub fn payload(&self, offset: HeaderOffset) -> SduResult<&[u8]> {
        let range = self.payload_range(offset)?;
        Ok(&self.sdu_data[range])
    }

    /// Number of information payload bytes
    pub fn payload_length(&self, offset: HeaderOffset) -> SduResult<usize> {
        self.payload_range(offset).map(|range| range.len())
    }

    /// FCS stored in the last two bytes of the frame
    pub fn fcs(&self) -> SduResult<u16> {
        let begin = self.payload_end()?;
        self.read_u16_at(begin)
    }

    /// FCS calculated over every byte preceding the stored FCS
    pub fn calculate_fcs(&self) -> u16 {
        let end = self.sdu_data.len().saturating_sub(SDU_FCS_SIZE);
        calculate_fcs(&self.sdu_data[..end])
    }

    /// Integrity of the frame
    pub fn status(&self) -> FrameStatus {
        if self.sdu_data.len() < SDU_MIN_SIZE {
            return FrameStatus::Malformed;
        }

        match self.fcs() {
            Ok(stored) if stored == self.calculate_fcs() => FrameStatus::Valid,
            Ok(_) => FrameStatus::Corrupt,
            Err(_) => FrameStatus::Malformed,
        }
    }

    /// Whether the stored FCS matches the calculated one
    pub fn is_valid(&self) -> bool {
        self.status() == FrameStatus::Valid
    }

    /// Check the frame, reporting why it is unusable
    pub fn verify(&self) -> SduResult<()> {
        if self.sdu_data.len() < SDU_MIN_SIZE {
            return Err(self.truncated(SDU_MIN_SIZE));
        }

        let expected = self.fcs()?;
        let calculated = self.calculate_fcs();
        if expected != calculated {
            warn!(
                "FCS mismatch: stored {:#06x}, calculated {:#06x}, frame {}",
                expected,
                calculated,
                hex::encode(&self.sdu_data)
            );
            return Err(SduError::ChecksumMismatch {
                expected,
                calculated,
            });
        }

        Ok(())
    }

    /// Borrow the whole frame
    pub fn as_bytes(&self) -> &[u8] {
        &self.sdu_data
    }

    /// Give back the frame's bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.sdu_data
    }
}

impl From<Vec<u8>> for SduFrame {
    fn from(sdu_data: Vec<u8>) -> Self {
        Self::new(sdu_data)
    }
}

impl From<&[u8]> for SduFrame {
    fn from(sdu_data: &[u8]) -> Self {
        Self::new(sdu_data.to_vec())
    }
}

impl AsRef<[u8]> for SduFrame {
    fn as_ref(&self) -> &[u8] {
        &self.sdu_data
    }
}

impl fmt::Display for SduFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SDU[{} bytes] {}", self.sdu_data.len(), hex::encode(&self.sdu_data))
    }
}
