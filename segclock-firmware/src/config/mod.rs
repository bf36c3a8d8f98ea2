//! Configuration loading
//!
//! The board configuration is embedded at build time and parsed by the
//! no_std TOML parser in segclock-core. Pin assignments are checked for
//! conflicts before any pin is claimed.

use defmt::*;

use segclock_core::config::{parse_config, ClockConfig, ParseError, PinConfig};
use segclock_hal_rp2040::{GpioAllocator, PinError};

/// Configuration loading errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML parsing failed
    Parse(ParseError),
    /// A pin is reserved, out of range or used twice
    Pin { pin: u8, error: PinError },
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Parse and validate the embedded configuration
///
/// Falls back to the built-in defaults if the text does not parse or
/// assigns pins that conflict.
pub fn load(text: &str) -> ClockConfig {
    match try_load(text) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            error!("Invalid embedded config: {:?}", e);
            error!("Using default configuration");
            ClockConfig::default()
        }
    }
}

fn try_load(text: &str) -> Result<ClockConfig, ConfigError> {
    let config = parse_config(text)?;
    check_pins(&config)?;
    Ok(config)
}

/// Output pins in the order they are claimed
pub fn output_pins(config: &ClockConfig) -> [PinConfig; 4] {
    [
        config.display.data_pin,
        config.display.clock_pin,
        config.display.latch_pin,
        config.chime.pin,
    ]
}

/// Check that every configured pin is free and not a UART pin
fn check_pins(config: &ClockConfig) -> Result<(), ConfigError> {
    let mut alloc = GpioAllocator::with_uart0_reserved();
    for pin in output_pins(config) {
        alloc
            .allocate(pin.pin)
            .map_err(|error| ConfigError::Pin { pin: pin.pin, error })?;
    }
    Ok(())
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ClockConfig) {
    let d = &config.display;
    debug!(
        "  display: data=gpio{} clock=gpio{} latch=gpio{} delay={}us",
        d.data_pin.pin, d.clock_pin.pin, d.latch_pin.pin, d.bit_delay_us
    );
    let c = &config.chime;
    debug!(
        "  chime: gpio{} inverted={} enabled={} {}x{}ms",
        c.pin.pin, c.pin.inverted, c.enabled, c.pulses, c.on_ms
    );
    let s = &config.sync;
    debug!(
        "  sync: {} baud, every {}s, retry {}s, utc offset {}s",
        s.baudrate, s.interval_s, s.retry_s, s.utc_offset_s
    );
    debug!(
        "  face: dots={} refresh={}ms",
        config.face.separator_dots, config.face.refresh_ms
    );
}
