//! GPIO buzzer chime
//!
//! Drives an active buzzer (one with its own oscillator) from a GPIO pin.
//! The pin can be configured as active-high (default) or active-low.

use embedded_hal::delay::DelayNs;
use segclock_core::config::ChimeConfig;
use segclock_core::traits::Chime;
use segclock_hal::OutputPin;

/// Beep burst played for one chime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChimePattern {
    /// Number of beeps
    pub pulses: u8,
    /// Beep length in milliseconds
    pub on_ms: u16,
    /// Silence between beeps in milliseconds
    pub off_ms: u16,
}

impl Default for ChimePattern {
    fn default() -> Self {
        Self {
            pulses: 3,
            on_ms: 40,
            off_ms: 80,
        }
    }
}

impl From<&ChimeConfig> for ChimePattern {
    fn from(config: &ChimeConfig) -> Self {
        Self {
            pulses: config.pulses,
            on_ms: config.on_ms,
            off_ms: config.off_ms,
        }
    }
}

/// Buzzer on a GPIO pin
pub struct Buzzer<P, T> {
    pin: P,
    delay: T,
    /// If true, buzzer ON = pin LOW
    inverted: bool,
    /// Hourly chimes enabled
    enabled: bool,
    pattern: ChimePattern,
}

impl<P: OutputPin, T: DelayNs> Buzzer<P, T> {
    /// Create a new buzzer, initially silent
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `delay`: Blocking delay used to time the beeps
    /// - `inverted`: If true, buzzer sounds when pin is LOW
    pub fn new(pin: P, delay: T, inverted: bool, pattern: ChimePattern) -> Self {
        let mut buzzer = Self {
            pin,
            delay,
            inverted,
            enabled: true,
            pattern,
        };
        buzzer.set_on(false);
        buzzer
    }

    /// Create a buzzer from board configuration
    pub fn from_config(pin: P, delay: T, config: &ChimeConfig) -> Self {
        let mut buzzer = Self::new(pin, delay, config.pin.inverted, ChimePattern::from(config));
        buzzer.enabled = config.enabled;
        buzzer
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pattern(&self) -> ChimePattern {
        self.pattern
    }

    /// Play the pattern once, even if hourly chimes are disabled
    pub fn beep(&mut self) {
        let ChimePattern {
            pulses,
            on_ms,
            off_ms,
        } = self.pattern;

        for i in 0..pulses {
            self.set_on(true);
            self.delay.delay_ms(on_ms as u32);
            self.set_on(false);
            if i + 1 < pulses {
                self.delay.delay_ms(off_ms as u32);
            }
        }
    }

    fn set_on(&mut self, on: bool) {
        // Normal: on=true, inverted=false → high
        // Inverted: on=true, inverted=true → low
        self.pin.set_state(on != self.inverted);
    }
}

impl<P: OutputPin, T: DelayNs> Chime for Buzzer<P, T> {
    fn chime(&mut self) {
        if self.enabled {
            self.beep();
        }
    }
}
