//! Time-Sync Link Protocol
//!
//! This crate defines the UART protocol between the clock board and a
//! network-capable companion that knows the wall time. The clock asks,
//! the companion answers; the clock never trusts an unsolicited frame.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–32B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The companion does the network work (NTP, daylight-saving lookup);
//! the clock only ever sees three bytes of UTC time and one DST flag.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{SyncReply, SyncRequest};
