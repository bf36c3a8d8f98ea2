//! Configuration types for the clock board

use crate::time::SyncSchedule;

/// Highest GPIO number on the RP2040
pub const MAX_GPIO: u8 = 29;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Shift-register chain wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayHwConfig {
    /// Serial data into the first register
    pub data_pin: PinConfig,
    /// Shift clock
    pub clock_pin: PinConfig,
    /// Storage register latch
    pub latch_pin: PinConfig,
    /// Half period of the shift clock in microseconds
    pub bit_delay_us: u32,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            data_pin: PinConfig::new(2),
            clock_pin: PinConfig::new(3),
            latch_pin: PinConfig::new(4),
            bit_delay_us: 1,
        }
    }
}

/// Hourly chime output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChimeConfig {
    /// Buzzer pin
    pub pin: PinConfig,
    /// Chime on every hour rollover
    pub enabled: bool,
    /// Number of beeps per chime
    pub pulses: u8,
    /// Beep length
    pub on_ms: u16,
    /// Gap between beeps
    pub off_ms: u16,
    /// Chime once after boot
    pub on_boot: bool,
}

impl Default for ChimeConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::new(5),
            enabled: true,
            pulses: 3,
            on_ms: 40,
            off_ms: 80,
            on_boot: true,
        }
    }
}

impl ChimeConfig {
    /// Total length of one chime in milliseconds
    pub fn duration_ms(&self) -> u32 {
        let pulses = self.pulses as u32;
        if pulses == 0 {
            return 0;
        }
        pulses * self.on_ms as u32 + (pulses - 1) * self.off_ms as u32
    }
}

/// Time-sync link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncConfig {
    /// UART baud rate to the companion
    pub baudrate: u32,
    /// Seconds between successful resyncs
    pub interval_s: u32,
    /// Seconds before retrying a failed resync
    pub retry_s: u32,
    /// Reply timeout per request
    pub timeout_ms: u32,
    /// Local standard time minus UTC
    pub utc_offset_s: i32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            // 59 x 25 minutes
            interval_s: 88_500,
            retry_s: 60,
            timeout_ms: 1_500,
            utc_offset_s: 7_200,
        }
    }
}

impl SyncConfig {
    /// Fetch schedule in milliseconds
    pub fn schedule(&self) -> SyncSchedule {
        SyncSchedule::new(
            self.interval_s.saturating_mul(1000),
            self.retry_s.saturating_mul(1000),
        )
    }
}

/// What the display shows and how often it refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceConfig {
    /// Light the separator dots between fields
    pub separator_dots: bool,
    /// Scheduler pass period
    pub refresh_ms: u32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            separator_dots: true,
            refresh_ms: 10,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub display: DisplayHwConfig,
    pub chime: ChimeConfig,
    pub sync: SyncConfig,
    pub face: FaceConfig,
}
