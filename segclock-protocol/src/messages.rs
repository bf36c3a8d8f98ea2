//! Message types for the time-sync link
//!
//! Message types are divided into two categories:
//! - Clock → Companion: requests
//! - Companion → Clock: replies

use crate::frame::{Frame, FrameError};

// Message type IDs: Clock → Companion
pub const MSG_TIME_REQUEST: u8 = 0x10;
pub const MSG_DST_REQUEST: u8 = 0x11;

// Message type IDs: Companion → Clock
pub const MSG_TIME: u8 = 0x30;
pub const MSG_DST: u8 = 0x31;
pub const MSG_NAK: u8 = 0x3F;

/// Requests sent by the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncRequest {
    /// Ask for the current UTC time of day
    Time,
    /// Ask whether daylight-saving time is in effect
    Dst,
}

impl SyncRequest {
    /// Encode this request into a frame
    pub fn to_frame(self) -> Frame {
        match self {
            SyncRequest::Time => Frame::empty(MSG_TIME_REQUEST),
            SyncRequest::Dst => Frame::empty(MSG_DST_REQUEST),
        }
    }

    /// Parse a request from a frame (companion side and tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_TIME_REQUEST => Ok(SyncRequest::Time),
            MSG_DST_REQUEST => Ok(SyncRequest::Dst),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Replies sent by the companion
///
/// Values are carried as received; range checking belongs to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncReply {
    /// UTC time of day
    Time { hour: u8, minute: u8, second: u8 },
    /// Daylight-saving flag (0 or 1)
    Dst { flag: u8 },
    /// Companion has no answer (not yet synchronized, lookup failed)
    Nak,
}

impl SyncReply {
    /// Parse a reply from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match (frame.msg_type, &frame.payload[..]) {
            (MSG_TIME, &[hour, minute, second]) => Ok(SyncReply::Time {
                hour,
                minute,
                second,
            }),
            (MSG_DST, &[flag]) => Ok(SyncReply::Dst { flag }),
            (MSG_NAK, _) => Ok(SyncReply::Nak),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this reply into a frame (companion side and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match *self {
            SyncReply::Time {
                hour,
                minute,
                second,
            } => Frame::new(MSG_TIME, &[hour, minute, second]),
            SyncReply::Dst { flag } => Frame::new(MSG_DST, &[flag]),
            SyncReply::Nak => Ok(Frame::empty(MSG_NAK)),
        }
    }
}
