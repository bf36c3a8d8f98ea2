//! When to ask the time source again

/// Fetch cadence for the time source
///
/// A fetch is due immediately after boot, then `interval_ms` after a
/// success or `retry_ms` after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncSchedule {
    interval_ms: u32,
    retry_ms: u32,
    /// Timestamp and result of the last attempt
    last: Option<(u32, bool)>,
}

impl SyncSchedule {
    pub const fn new(interval_ms: u32, retry_ms: u32) -> Self {
        Self {
            interval_ms,
            retry_ms,
            last: None,
        }
    }

    /// Check whether a fetch should run at `now_ms`
    pub fn is_due(&self, now_ms: u32) -> bool {
        match self.last {
            None => true,
            Some((at, ok)) => {
                let wait = if ok { self.interval_ms } else { self.retry_ms };
                now_ms.wrapping_sub(at) >= wait
            }
        }
    }

    /// Record the result of an attempt made at `now_ms`
    pub fn record(&mut self, now_ms: u32, ok: bool) {
        self.last = Some((now_ms, ok));
    }

    /// Make the next call to [`is_due`](Self::is_due) return true
    pub fn expire(&mut self) {
        self.last = None;
    }

    /// Timestamp of the last successful attempt, if the last one succeeded
    pub fn last_success(&self) -> Option<u32> {
        match self.last {
            Some((at, true)) => Some(at),
            _ => None,
        }
    }
}
