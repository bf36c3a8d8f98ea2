//! Millisecond clock on the embassy time driver

use embassy_time::Instant;
use segclock_hal::MillisClock;

/// `MillisClock` backed by the embassy time driver
///
/// The 64-bit uptime is truncated to 32 bits, so readings wrap like a
/// classic `millis()` counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MillisClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
