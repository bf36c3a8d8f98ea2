//! Frame encoding and decoding for the time-sync link.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-32)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-32 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// START + LENGTH + TYPE + CHECKSUM
const OVERHEAD: usize = 4;

/// Largest possible encoded frame
pub const MAX_FRAME_SIZE: usize = OVERHEAD + MAX_PAYLOAD_SIZE;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Invalid frame structure or unknown message type
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// One message on the link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Build a frame, copying the payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Build a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Length of the encoded frame in bytes
    pub fn encoded_len(&self) -> usize {
        OVERHEAD + self.payload.len()
    }

    /// XOR over everything between START and CHECKSUM
    pub fn checksum(&self) -> u8 {
        self.payload
            .iter()
            .fold(self.payload.len() as u8 ^ self.msg_type, |acc, b| acc ^ b)
    }

    /// Write the frame to `buffer`, returning the number of bytes used
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[FRAME_START, self.payload.len() as u8, self.msg_type]);
        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = self.checksum();

        Ok(len)
    }

    /// Encode into an owned buffer
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut out = Vec::new();
        out.resize(self.encoded_len(), 0)
            .map_err(|_| FrameError::BufferTooSmall)?;
        self.encode(&mut out)?;
        Ok(out)
    }
}

/// Where the decoder is inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Hunting for FRAME_START
    Idle,
    Length,
    Type { len: u8 },
    Payload { len: u8, msg_type: u8 },
    Checksum { msg_type: u8 },
}

/// Byte-at-a-time frame decoder
///
/// Bytes arriving before a START byte are dropped, so the parser
/// resynchronizes by itself after line noise or a half-received frame.
/// Any error returns it to the idle state.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    /// Running XOR of the bytes seen so far
    sum: u8,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            payload: Vec::new(),
            sum: 0,
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.stage = Stage::Idle;
        self.payload.clear();
        self.sum = 0;
    }

    /// True while part of a frame has been received
    pub fn in_frame(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.stage = match self.stage {
            Stage::Idle if byte == FRAME_START => Stage::Length,
            Stage::Idle => Stage::Idle,
            Stage::Length if byte as usize > MAX_PAYLOAD_SIZE => {
                self.reset();
                return Err(FrameError::InvalidFrame);
            }
            Stage::Length => {
                self.sum = byte;
                Stage::Type { len: byte }
            }
            Stage::Type { len } => {
                self.sum ^= byte;
                self.payload.clear();
                if len == 0 {
                    Stage::Checksum { msg_type: byte }
                } else {
                    Stage::Payload { len, msg_type: byte }
                }
            }
            Stage::Payload { len, msg_type } => {
                self.sum ^= byte;
                // Length was bounded when it was read
                let _ = self.payload.push(byte);
                if self.payload.len() == len as usize {
                    Stage::Checksum { msg_type }
                } else {
                    Stage::Payload { len, msg_type }
                }
            }
            Stage::Checksum { msg_type } => {
                let valid = byte == self.sum;
                let payload = core::mem::take(&mut self.payload);
                self.reset();
                if !valid {
                    return Err(FrameError::InvalidChecksum);
                }
                return Ok(Some(Frame { msg_type, payload }));
            }
        };
        Ok(None)
    }

    /// Feed bytes until the first complete frame
    ///
    /// Bytes after that frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
