//! One scheduler pass over the clock
//!
//! The engine owns the clock counters and the display image. Each pass
//! runs strictly in order: resync if due, advance the local tick,
//! re-encode every field, present the image.

use crate::display::{encode_field, Dataframe, Field};
use crate::time::{ClockState, SyncOutcome, TimeSyncAdapter};
use crate::traits::{Chime, DisplayDriver, DstSource, TimeSource};

/// What happened during one [`ClockEngine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassReport {
    pub sync: SyncOutcome,
    /// A second elapsed and the counters moved
    pub advanced: bool,
}

/// Owned clock state plus its rendered image
#[derive(Debug, Clone)]
pub struct ClockEngine {
    clock: ClockState,
    frame: Dataframe,
}

impl ClockEngine {
    /// Create an engine at 00:00:00 with a blank display image
    pub fn new(show_separator_dots: bool) -> Self {
        Self {
            clock: ClockState::new(show_separator_dots),
            frame: Dataframe::blank(),
        }
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut ClockState {
        &mut self.clock
    }

    /// Image from the most recent pass
    pub fn frame(&self) -> &Dataframe {
        &self.frame
    }

    /// Re-encode the display image from the current counters
    pub fn encode(&mut self) {
        let dots = self.clock.show_separator_dots();
        let (h, m, s) = self.clock.hms();
        for (field, value) in Field::ALL.into_iter().zip([h, m, s]) {
            self.frame.set_field(field, encode_field(field, value, dots));
        }
    }

    /// Run one full pass
    pub fn step<S, C, D>(
        &mut self,
        now_ms: u32,
        sync: &mut TimeSyncAdapter<S>,
        chime: &mut C,
        display: &mut D,
    ) -> PassReport
    where
        S: TimeSource + DstSource,
        C: Chime,
        D: DisplayDriver,
    {
        let sync = sync.poll(now_ms, &mut self.clock);
        let advanced = self.clock.run(now_ms, chime);
        self.encode();
        display.present(&self.frame);

        PassReport { sync, advanced }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{DstCorrection, SyncSchedule, TimeSample};
    use crate::traits::SyncError;

    #[derive(Default)]
    struct CountingChime {
        count: u32,
    }

    impl Chime for CountingChime {
        fn chime(&mut self) {
            self.count += 1;
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        frames: Vec<[u8; 6]>,
    }

    impl DisplayDriver for RecordingDisplay {
        fn present(&mut self, frame: &Dataframe) {
            self.frames.push(*frame.as_bytes());
        }
    }

    struct FixedSource {
        time: Result<TimeSample, SyncError>,
    }

    impl TimeSource for FixedSource {
        fn fetch_time(&mut self) -> Result<TimeSample, SyncError> {
            self.time
        }
    }

    impl DstSource for FixedSource {
        fn fetch_dst(&mut self) -> Result<DstCorrection, SyncError> {
            Ok(DstCorrection::Off)
        }
    }

    fn adapter(time: Result<TimeSample, SyncError>) -> TimeSyncAdapter<FixedSource> {
        TimeSyncAdapter::new(FixedSource { time }, SyncSchedule::new(3_600_000, 60_000))
    }

    #[test]
    fn test_new_engine_is_blank() {
        let engine = ClockEngine::new(true);
        assert_eq!(engine.frame(), &Dataframe::blank());
        assert_eq!(engine.clock().hms(), (0, 0, 0));
    }

    #[test]
    fn test_step_presents_synced_time() {
        let mut engine = ClockEngine::new(true);
        let mut sync = adapter(TimeSample::new(12, 34, 56));
        let mut chime = CountingChime::default();
        let mut display = RecordingDisplay::default();

        let report = engine.step(500, &mut sync, &mut chime, &mut display);
        assert!(matches!(report.sync, SyncOutcome::Applied(_)));
        assert!(!report.advanced);
        assert_eq!(display.frames, vec![[0xE4, 0xD2, 0x42, 0x8C, 0x11, 0x81]]);
    }

    #[test]
    fn test_step_ticks_on_top_of_resync() {
        let mut engine = ClockEngine::new(true);
        let mut sync = adapter(TimeSample::new(12, 34, 56));
        let mut chime = CountingChime::default();
        let mut display = RecordingDisplay::default();

        // Sync and the first tick land in the same pass
        let report = engine.step(1_000, &mut sync, &mut chime, &mut display);
        assert!(report.advanced);
        assert_eq!(engine.clock().hms(), (12, 34, 57));

        let report = engine.step(1_500, &mut sync, &mut chime, &mut display);
        assert_eq!(report.sync, SyncOutcome::Skipped);
        assert!(!report.advanced);
        assert_eq!(engine.clock().hms(), (12, 34, 57));
        assert_eq!(display.frames.len(), 2);
    }

    #[test]
    fn test_step_survives_sync_failure() {
        let mut engine = ClockEngine::new(false);
        let mut sync = adapter(Err(SyncError::Timeout));
        let mut chime = CountingChime::default();
        let mut display = RecordingDisplay::default();

        let report = engine.step(1_000, &mut sync, &mut chime, &mut display);
        assert_eq!(report.sync, SyncOutcome::Failed(SyncError::Timeout));
        assert!(report.advanced);
        assert_eq!(engine.clock().hms(), (0, 0, 1));
        assert_eq!(
            engine.frame().field(Field::Seconds),
            encode_field(Field::Seconds, 1, false)
        );
    }

    #[test]
    fn test_step_chimes_on_the_hour() {
        let mut engine = ClockEngine::new(true);
        let mut sync = adapter(TimeSample::new(6, 59, 59));
        let mut chime = CountingChime::default();
        let mut display = RecordingDisplay::default();

        engine.step(0, &mut sync, &mut chime, &mut display);
        engine.step(1_000, &mut sync, &mut chime, &mut display);
        assert_eq!(engine.clock().hms(), (7, 0, 0));
        assert_eq!(chime.count, 1);
    }
}
