//! Simple TOML parser for the clock configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Segclock configuration. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...)
//!
//! Unknown keys are ignored, unknown sections are rejected. Keys that are
//! not set keep their defaults.

use super::types::{
    ChimeConfig, ClockConfig, DisplayHwConfig, FaceConfig, PinConfig, SyncConfig, MAX_GPIO,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Value parsed but outside its allowed range
    OutOfRange,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Chime,
    Sync,
    Face,
}

/// Parse TOML configuration into ClockConfig
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "chime" => Ok(Section::Chime),
        "sync" => Ok(Section::Sync),
        "face" => Ok(Section::Face),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once('=')?;
    let (key, value) = (key.trim(), strip_comment(rest).trim());
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

/// Cut a trailing `# comment`, leaving `#` inside a quoted string alone
fn strip_comment(value: &str) -> &str {
    let mut quoted = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &value[..i],
            _ => {}
        }
    }
    value
}

fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    // TOML allows underscores as digit separators
    let mut buf = [0u8; 24];
    let mut len = 0;
    for b in value.bytes().filter(|&b| b != b'_') {
        *buf.get_mut(len).ok_or(ParseError::InvalidValue)? = b;
        len += 1;
    }
    let digits = core::str::from_utf8(&buf[..len]).map_err(|_| ParseError::InvalidValue)?;
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like `"gpio5"` or `"!gpio5"` (active-low)
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut inverted = false;

    if let Some(rest) = s.strip_prefix('!') {
        inverted = true;
        s = rest;
    }

    // Parse "gpioNN"
    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = num.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin > MAX_GPIO {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinConfig { pin, inverted })
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ClockConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Display => apply_display(&mut config.display, key, value),
        Section::Chime => apply_chime(&mut config.chime, key, value),
        Section::Sync => apply_sync(&mut config.sync, key, value),
        Section::Face => apply_face(&mut config.face, key, value),
        Section::Root => Ok(()),
    }
}

fn apply_display(d: &mut DisplayHwConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "data_pin" => d.data_pin = parse_pin(value)?,
        "clock_pin" => d.clock_pin = parse_pin(value)?,
        "latch_pin" => d.latch_pin = parse_pin(value)?,
        "bit_delay_us" => d.bit_delay_us = parse_int(value)?,
        _ => {} // Ignore unknown keys
    }
    Ok(())
}

fn apply_chime(c: &mut ChimeConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "pin" => c.pin = parse_pin(value)?,
        "enabled" => c.enabled = parse_bool(value)?,
        "pulses" => c.pulses = parse_int(value)?,
        "on_ms" => c.on_ms = parse_int(value)?,
        "off_ms" => c.off_ms = parse_int(value)?,
        "on_boot" => c.on_boot = parse_bool(value)?,
        _ => {}
    }
    Ok(())
}

fn apply_sync(s: &mut SyncConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "baudrate" => s.baudrate = parse_int(value)?,
        "interval_s" => s.interval_s = parse_int(value)?,
        "retry_s" => s.retry_s = parse_int(value)?,
        "timeout_ms" => s.timeout_ms = parse_int(value)?,
        "utc_offset_s" => s.utc_offset_s = parse_int(value)?,
        _ => {}
    }
    Ok(())
}

fn apply_face(f: &mut FaceConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "separator_dots" => f.separator_dots = parse_bool(value)?,
        "refresh_ms" => f.refresh_ms = parse_int(value)?,
        _ => {}
    }
    Ok(())
}

/// Range checks that the individual value parsers cannot do
fn validate(config: &ClockConfig) -> Result<(), ParseError> {
    let sync = &config.sync;
    // Schedule works in u32 milliseconds
    if sync.interval_s == 0 || sync.interval_s > u32::MAX / 1000 {
        return Err(ParseError::OutOfRange);
    }
    if sync.retry_s == 0 || sync.retry_s > u32::MAX / 1000 {
        return Err(ParseError::OutOfRange);
    }
    if sync.baudrate == 0 || sync.timeout_ms == 0 {
        return Err(ParseError::OutOfRange);
    }
    if sync.utc_offset_s.unsigned_abs() >= 86_400 {
        return Err(ParseError::OutOfRange);
    }
    // Passes must run well inside one second to catch every tick
    if config.face.refresh_ms == 0 || config.face.refresh_ms >= 1000 {
        return Err(ParseError::OutOfRange);
    }
    if config.chime.enabled && config.chime.pulses == 0 {
        return Err(ParseError::OutOfRange);
    }
    Ok(())
}
