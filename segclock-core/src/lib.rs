//! Board-agnostic core logic for the seven-segment clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Glyph tables and the tens/ones merge for the shift-register chain
//! - The six-byte display image
//! - The seconds counter and its rollover state machine
//! - Time-sync scheduling and the daylight-saving cache
//! - The per-pass engine tying it all together
//! - Configuration types and the embedded TOML parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod engine;
pub mod time;
pub mod traits;

pub use engine::{ClockEngine, PassReport};
