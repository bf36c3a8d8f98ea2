//! Authoritative time samples and the resync adapter

use super::clock::ClockState;
use super::schedule::SyncSchedule;
use crate::traits::{DstSource, SyncError, TimeSource};

const SECONDS_PER_DAY: i32 = 86_400;

/// A validated wall-clock reading from the time source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeSample {
    /// Create a sample, rejecting out-of-range fields
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, SyncError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(SyncError::InvalidTime);
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Convert a UTC reading to local standard time
    ///
    /// `utc_offset_s` may be negative. The result wraps within one day;
    /// the date is not tracked.
    pub fn from_utc(hour: u8, minute: u8, second: u8, utc_offset_s: i32) -> Result<Self, SyncError> {
        let utc = Self::new(hour, minute, second)?;
        let local = (utc.seconds_of_day() + utc_offset_s.rem_euclid(SECONDS_PER_DAY))
            .rem_euclid(SECONDS_PER_DAY);
        Ok(Self {
            hour: (local / 3600) as u8,
            minute: (local / 60 % 60) as u8,
            second: (local % 60) as u8,
        })
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

    /// Seconds since midnight
    pub fn seconds_of_day(&self) -> i32 {
        self.hour as i32 * 3600 + self.minute as i32 * 60 + self.second as i32
    }
}

/// Daylight-saving hour offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DstCorrection {
    /// Standard time
    #[default]
    Off,
    /// Summer time, one hour ahead
    On,
}

impl DstCorrection {
    /// Decode the single-byte flag from the source
    pub fn from_byte(flag: u8) -> Result<Self, SyncError> {
        match flag {
            0 => Ok(DstCorrection::Off),
            1 => Ok(DstCorrection::On),
            _ => Err(SyncError::InvalidDst),
        }
    }

    /// Hours to add to the synchronized hour
    pub const fn hours(self) -> u8 {
        match self {
            DstCorrection::Off => 0,
            DstCorrection::On => 1,
        }
    }
}

/// Lazily fetched, cached DST correction
///
/// The flag is queried from the source on first need and kept for the
/// lifetime of the provider. A failed query is not cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DstProvider {
    cached: Option<DstCorrection>,
}

impl DstProvider {
    pub const fn new() -> Self {
        Self { cached: None }
    }

    /// Cached correction, fetching it first if needed
    pub fn correction<S: DstSource>(&mut self, source: &mut S) -> Result<DstCorrection, SyncError> {
        if let Some(dst) = self.cached {
            return Ok(dst);
        }
        let dst = source.fetch_dst()?;
        self.cached = Some(dst);
        Ok(dst)
    }

    pub fn cached(&self) -> Option<DstCorrection> {
        self.cached
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}

/// Result of one [`TimeSyncAdapter::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// No fetch was due
    Skipped,
    /// The clock was overwritten with this sample
    Applied(TimeSample),
    /// The fetch failed; the clock kept its values
    Failed(SyncError),
}

/// Periodically overwrites a [`ClockState`] from an external source
pub struct TimeSyncAdapter<S> {
    source: S,
    dst: DstProvider,
    schedule: SyncSchedule,
}

impl<S: TimeSource + DstSource> TimeSyncAdapter<S> {
    pub fn new(source: S, schedule: SyncSchedule) -> Self {
        Self {
            source,
            dst: DstProvider::new(),
            schedule,
        }
    }

    /// Resync the clock if a fetch is due
    ///
    /// A time fetch failure leaves the clock untouched and schedules a
    /// retry. A DST fetch failure applies the time without correction and
    /// also schedules a retry, until the flag has been fetched once.
    pub fn poll(&mut self, now_ms: u32, clock: &mut ClockState) -> SyncOutcome {
        if !self.schedule.is_due(now_ms) {
            return SyncOutcome::Skipped;
        }

        let sample = match self.source.fetch_time() {
            Ok(sample) => sample,
            Err(e) => {
                self.schedule.record(now_ms, false);
                return SyncOutcome::Failed(e);
            }
        };

        let dst = self
            .dst
            .correction(&mut self.source)
            .unwrap_or(DstCorrection::Off);
        clock.resync(sample, dst);
        self.schedule.record(now_ms, self.dst.is_cached());
        SyncOutcome::Applied(sample)
    }

    /// DST correction, once it has been fetched successfully
    pub fn dst(&self) -> Option<DstCorrection> {
        self.dst.cached()
    }

    pub fn schedule(&self) -> &SyncSchedule {
        &self.schedule
    }

    /// Force a fetch on the next poll
    pub fn request_sync(&mut self) {
        self.schedule.expire();
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedSource {
        time: Result<TimeSample, SyncError>,
        dst: Result<DstCorrection, SyncError>,
        time_calls: u32,
        dst_calls: u32,
    }

    impl ScriptedSource {
        fn new(time: Result<TimeSample, SyncError>, dst: Result<DstCorrection, SyncError>) -> Self {
            Self {
                time,
                dst,
                time_calls: 0,
                dst_calls: 0,
            }
        }
    }

    impl TimeSource for ScriptedSource {
        fn fetch_time(&mut self) -> Result<TimeSample, SyncError> {
            self.time_calls += 1;
            self.time
        }
    }

    impl DstSource for ScriptedSource {
        fn fetch_dst(&mut self) -> Result<DstCorrection, SyncError> {
            self.dst_calls += 1;
            self.dst
        }
    }

    fn sample(h: u8, m: u8, s: u8) -> TimeSample {
        TimeSample::new(h, m, s).unwrap()
    }

    #[test]
    fn test_sample_validation() {
        assert!(TimeSample::new(23, 59, 59).is_ok());
        assert_eq!(TimeSample::new(24, 0, 0), Err(SyncError::InvalidTime));
        assert_eq!(TimeSample::new(0, 60, 0), Err(SyncError::InvalidTime));
        assert_eq!(TimeSample::new(0, 0, 60), Err(SyncError::InvalidTime));
    }

    #[test]
    fn test_from_utc_offsets() {
        assert_eq!(TimeSample::from_utc(10, 30, 0, 7200), Ok(sample(12, 30, 0)));
        assert_eq!(TimeSample::from_utc(23, 0, 0, 7200), Ok(sample(1, 0, 0)));
        assert_eq!(TimeSample::from_utc(1, 0, 5, -5 * 3600), Ok(sample(20, 0, 5)));
        assert_eq!(TimeSample::from_utc(0, 0, 0, 0), Ok(sample(0, 0, 0)));
        assert_eq!(TimeSample::from_utc(25, 0, 0, 0), Err(SyncError::InvalidTime));
    }

    #[test]
    fn test_dst_from_byte() {
        assert_eq!(DstCorrection::from_byte(0), Ok(DstCorrection::Off));
        assert_eq!(DstCorrection::from_byte(1), Ok(DstCorrection::On));
        assert_eq!(DstCorrection::from_byte(2), Err(SyncError::InvalidDst));
    }

    #[test]
    fn test_dst_provider_caches() {
        let mut source = ScriptedSource::new(Ok(sample(0, 0, 0)), Ok(DstCorrection::On));
        let mut provider = DstProvider::new();
        assert!(!provider.is_cached());

        assert_eq!(provider.correction(&mut source), Ok(DstCorrection::On));
        source.dst = Ok(DstCorrection::Off);
        assert_eq!(provider.correction(&mut source), Ok(DstCorrection::On));
        assert_eq!(source.dst_calls, 1);
        assert!(provider.is_cached());
    }

    #[test]
    fn test_dst_provider_does_not_cache_failure() {
        let mut source = ScriptedSource::new(Ok(sample(0, 0, 0)), Err(SyncError::Timeout));
        let mut provider = DstProvider::new();

        assert_eq!(provider.correction(&mut source), Err(SyncError::Timeout));
        assert!(!provider.is_cached());

        source.dst = Ok(DstCorrection::On);
        assert_eq!(provider.correction(&mut source), Ok(DstCorrection::On));
        assert_eq!(source.dst_calls, 2);
    }

    #[test]
    fn test_poll_applies_time_with_dst() {
        let source = ScriptedSource::new(Ok(sample(12, 34, 56)), Ok(DstCorrection::On));
        let mut adapter = TimeSyncAdapter::new(source, SyncSchedule::new(60_000, 5_000));
        let mut clock = ClockState::new(true);

        assert_eq!(adapter.poll(0, &mut clock), SyncOutcome::Applied(sample(12, 34, 56)));
        assert_eq!(clock.hms(), (13, 34, 56));
        assert_eq!(adapter.dst(), Some(DstCorrection::On));
    }

    #[test]
    fn test_poll_skips_until_interval() {
        let source = ScriptedSource::new(Ok(sample(1, 2, 3)), Ok(DstCorrection::Off));
        let mut adapter = TimeSyncAdapter::new(source, SyncSchedule::new(60_000, 5_000));
        let mut clock = ClockState::new(true);

        adapter.poll(0, &mut clock);
        assert_eq!(adapter.poll(59_999, &mut clock), SyncOutcome::Skipped);
        assert!(matches!(adapter.poll(60_000, &mut clock), SyncOutcome::Applied(_)));
        assert_eq!(adapter.source_mut().time_calls, 2);
        assert_eq!(adapter.source_mut().dst_calls, 1);
    }

    #[test]
    fn test_failed_poll_keeps_clock() {
        let source = ScriptedSource::new(Err(SyncError::Timeout), Ok(DstCorrection::On));
        let mut adapter = TimeSyncAdapter::new(source, SyncSchedule::new(60_000, 5_000));
        let mut clock = ClockState::new(true);
        clock.resync(sample(8, 15, 30), DstCorrection::Off);
        let before = clock.clone();

        assert_eq!(
            adapter.poll(1_000, &mut clock),
            SyncOutcome::Failed(SyncError::Timeout)
        );
        assert_eq!(clock, before);

        // Retried after the short delay, not the full interval
        assert_eq!(adapter.poll(5_999, &mut clock), SyncOutcome::Skipped);
        adapter.source_mut().time = Ok(sample(9, 0, 0));
        assert!(matches!(adapter.poll(6_000, &mut clock), SyncOutcome::Applied(_)));
        assert_eq!(clock.hms(), (10, 0, 0));
    }

    #[test]
    fn test_dst_failure_applies_uncorrected_and_retries() {
        let source = ScriptedSource::new(Ok(sample(10, 0, 0)), Err(SyncError::Unavailable));
        let mut adapter = TimeSyncAdapter::new(source, SyncSchedule::new(60_000, 5_000));
        let mut clock = ClockState::new(true);

        assert!(matches!(adapter.poll(0, &mut clock), SyncOutcome::Applied(_)));
        assert_eq!(clock.hour(), 10);
        assert_eq!(adapter.dst(), None);

        adapter.source_mut().dst = Ok(DstCorrection::On);
        adapter.request_sync();
        adapter.poll(100, &mut clock);
        assert_eq!(clock.hour(), 11);
        assert_eq!(adapter.dst(), Some(DstCorrection::On));
    }

    #[test]
    fn test_dst_failure_retries_on_short_delay() {
        let source = ScriptedSource::new(Ok(sample(10, 0, 0)), Err(SyncError::Unavailable));
        let mut adapter = TimeSyncAdapter::new(source, SyncSchedule::new(88_500_000, 60_000));
        let mut clock = ClockState::new(true);

        assert!(matches!(adapter.poll(0, &mut clock), SyncOutcome::Applied(_)));
        assert_eq!(clock.hour(), 10);

        adapter.source_mut().dst = Ok(DstCorrection::On);
        assert_eq!(adapter.poll(59_999, &mut clock), SyncOutcome::Skipped);
        assert_eq!(
            adapter.poll(60_000, &mut clock),
            SyncOutcome::Applied(sample(10, 0, 0))
        );
        assert_eq!(clock.hour(), 11);

        // With the flag cached, the full interval applies again
        assert_eq!(adapter.poll(120_000, &mut clock), SyncOutcome::Skipped);
        assert!(adapter.schedule().last_success().is_some());
    }

    #[test]
    fn test_sample_rejects_out_of_range() {
        assert_eq!(TimeSample::new(24, 0, 0), Err(SyncError::InvalidTime));
        assert_eq!(TimeSample::new(0, 60, 0), Err(SyncError::InvalidTime));
        assert_eq!(TimeSample::new(0, 0, 60), Err(SyncError::InvalidTime));
        assert_eq!(TimeSample::from_utc(255, 0, 0, 0), Err(SyncError::InvalidTime));

        let s = sample(23, 59, 59);
        assert_eq!((s.hour(), s.minute(), s.second()), (23, 59, 59));
    }
}
