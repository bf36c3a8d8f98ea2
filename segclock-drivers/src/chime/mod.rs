//! Chime output drivers

pub mod buzzer;

pub use buzzer::{Buzzer, ChimePattern};
