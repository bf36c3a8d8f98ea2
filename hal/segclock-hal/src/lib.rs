//! Segclock Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the clock needs,
//! so that drivers and the core engine can be tested on the host and
//! bound to a concrete chip by a separate HAL crate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (segclock-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segclock-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ segclock-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output lines (bus lines, buzzer)
//! - [`time::MillisClock`] - Free-running millisecond counter

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use time::MillisClock;
