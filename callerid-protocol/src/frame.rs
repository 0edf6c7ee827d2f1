//! Frame encoding and checksum for MDMF caller-ID messages.
//!
//! Frame format:
//! - PREAMBLE (not part of the frame): run of 0x55 channel seizure bytes
//! - TYPE (1 byte): message type, 0x80 for MDMF
//! - LENGTH (1 byte): parameter bytes that follow (1-255)
//! - PARAMETERS (LENGTH bytes): tag-length-value fields
//! - CHECKSUM (1 byte): two's complement of the sum of TYPE, LENGTH and PARAMETERS

use core::fmt;

use heapless::Vec;

/// Channel seizure byte (ASCII 'U', alternating mark/space bits)
pub const PREAMBLE_BYTE: u8 = 0x55;

/// Consecutive preamble bytes needed before listening for a message type
pub const PREAMBLE_RUN: usize = 16;

/// Bytes to wait for a message type after the preamble before giving up
pub const SYNC_HOLD: usize = 16;

/// Multiple Data Message Format message type
pub const MSG_TYPE_MDMF: u8 = 0x80;

/// Maximum parameter bytes in one message (LENGTH is a single byte)
pub const MAX_PAYLOAD_SIZE: usize = 255;

/// Maximum complete frame size (TYPE + LENGTH + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame reassembly or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Bytes from TYPE through CHECKSUM do not sum to zero
    InvalidChecksum,
    /// LENGTH byte was zero
    ZeroLength,
    /// Message type is not MDMF
    UnexpectedType(u8),
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::InvalidChecksum => f.write_str("checksum mismatch"),
            FrameError::ZeroLength => f.write_str("zero-length message"),
            FrameError::UnexpectedType(t) => write!(f, "unexpected message type {t:#04x}"),
            FrameError::PayloadTooLarge => f.write_str("payload too large"),
            FrameError::BufferTooSmall => f.write_str("buffer too small"),
        }
    }
}

/// Sum bytes with 8-bit wraparound
fn wrapping_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Compute the checksum byte a sender appends after `bytes`
///
/// `bytes` is everything from TYPE through the last parameter byte.
pub fn checksum(bytes: &[u8]) -> u8 {
    wrapping_sum(bytes).wrapping_neg()
}

/// Check a complete frame, TYPE through CHECKSUM inclusive
///
/// Valid iff all bytes sum to zero modulo 256.
pub fn checksum_valid(frame: &[u8]) -> bool {
    wrapping_sum(frame) == 0
}

/// A reassembled or constructed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Parameter bytes
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Create an MDMF frame around a parameter payload
    pub fn mdmf(payload: &[u8]) -> Result<Self, FrameError> {
        Self::new(MSG_TYPE_MDMF, payload)
    }

    /// Value of the LENGTH byte
    pub fn length(&self) -> u8 {
        // Bounded by MAX_PAYLOAD_SIZE
        self.payload.len() as u8
    }

    /// Check whether this is an MDMF message
    pub fn is_mdmf(&self) -> bool {
        self.msg_type == MSG_TYPE_MDMF
    }

    /// Checksum byte for this frame
    pub fn checksum(&self) -> u8 {
        let header = wrapping_sum(&[self.msg_type, self.length()]);
        header.wrapping_add(wrapping_sum(&self.payload)).wrapping_neg()
    }

    /// Size of the encoded frame in bytes
    pub fn encoded_len(&self) -> usize {
        3 + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = self.msg_type;
        buffer[1] = self.length();
        buffer[2..2 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[2 + self.payload.len()] = self.checksum();

        Ok(frame_len)
    }

    /// Encode this frame preceded by a channel seizure run
    ///
    /// This is what a line interface emits, byte for byte.
    pub fn encode_with_preamble(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        if buffer.len() < PREAMBLE_RUN + self.encoded_len() {
            return Err(FrameError::BufferTooSmall);
        }
        buffer[..PREAMBLE_RUN].fill(PREAMBLE_BYTE);
        let len = self.encode(&mut buffer[PREAMBLE_RUN..])?;
        Ok(PREAMBLE_RUN + len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}
