//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in segclock-core:
//!
//! - Display output (74HC595-style shift-register chain)
//! - Chime (GPIO buzzer)
//! - Time sync (framed UART link to a network companion)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod chime;
pub mod display;
pub mod sync;
