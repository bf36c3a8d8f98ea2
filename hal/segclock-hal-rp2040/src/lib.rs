//! RP2040-specific HAL for the seven-segment clock
//!
//! This crate provides RP2040 implementations of the shared
//! `segclock-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO allocation for config-driven pin checks
//! - A pin bank handing out pins by number
//! - Output pins and the millisecond clock on top of embassy

#![no_std]

pub mod gpio;
pub mod pins;
pub mod time;

pub use gpio::{GpioAllocator, GpioOutput, GPIO_COUNT, UART0_RX_PIN, UART0_TX_PIN};
pub use pins::{PinBank, PinError, SyncUartPeripherals};
pub use time::EmbassyClock;
