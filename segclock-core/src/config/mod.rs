//! Configuration types
//!
//! Board configuration is written as a small TOML file and parsed here
//! without an allocator.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, parse_pin, ParseError};
pub use types::*;
