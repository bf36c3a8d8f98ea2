//! Seconds counter and rollover state machine

use super::sync::{DstCorrection, TimeSample};
use crate::traits::Chime;

/// Milliseconds per local tick
pub const TICK_MS: u32 = 1000;

/// Running wall-clock counters
///
/// Created once at boot with zero time and mutated for the lifetime of the
/// firmware, either by [`run`](Self::run) or by an authoritative
/// [`resync`](Self::resync).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    hour: u8,
    minute: u8,
    second: u8,
    last_tick_ms: u32,
    second_pending: bool,
    show_separator_dots: bool,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ClockState {
    /// Create a clock at 00:00:00
    pub const fn new(show_separator_dots: bool) -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            last_tick_ms: 0,
            second_pending: false,
            show_separator_dots,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Current time as `(hour, minute, second)`
    pub fn hms(&self) -> (u8, u8, u8) {
        (self.hour, self.minute, self.second)
    }

    /// Millisecond timestamp of the last detected tick
    pub fn last_tick_ms(&self) -> u32 {
        self.last_tick_ms
    }

    pub fn show_separator_dots(&self) -> bool {
        self.show_separator_dots
    }

    pub fn set_show_separator_dots(&mut self, show: bool) {
        self.show_separator_dots = show;
    }

    /// Evaluate one scheduler pass
    ///
    /// Detects at most one elapsed second per call, no matter how far
    /// `now_ms` has moved past the previous tick. Time lost to a long pass
    /// is not made up. Returns true if the clock advanced.
    pub fn run<C: Chime>(&mut self, now_ms: u32, chime: &mut C) -> bool {
        let elapsed = now_ms.wrapping_sub(self.last_tick_ms);
        if elapsed >= TICK_MS {
            self.second_pending = true;
            self.last_tick_ms = now_ms;
        }

        if !self.second_pending {
            return false;
        }

        self.advance_second(chime);
        self.second_pending = false;
        true
    }

    fn advance_second<C: Chime>(&mut self, chime: &mut C) {
        self.second += 1;
        if self.second >= 60 {
            self.second = 0;
            self.minute += 1;
        }
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
            chime.chime();
        }
        if self.hour >= 24 {
            self.hour = 0;
        }
    }

    /// Replace the counters with an authoritative time
    ///
    /// The DST hour is added with wraparound at 24. The tick reference is
    /// left alone so local counting carries on from the new value.
    pub fn resync(&mut self, sample: TimeSample, dst: DstCorrection) {
        self.hour = (sample.hour() % 24 + dst.hours()) % 24;
        self.minute = sample.minute();
        self.second = sample.second();
    }
}
