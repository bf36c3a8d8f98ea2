//! Time keeping and authoritative resync
//!
//! `ClockState` counts seconds locally against a free-running millisecond
//! tick. `TimeSyncAdapter` periodically overwrites it with values from an
//! external source and caches the daylight-saving correction.

pub mod clock;
pub mod schedule;
pub mod sync;

pub use clock::{ClockState, TICK_MS};
pub use schedule::SyncSchedule;
pub use sync::{DstCorrection, DstProvider, SyncOutcome, TimeSample, TimeSyncAdapter};
