//! Time-sync source traits

use crate::time::{DstCorrection, TimeSample};

/// Errors that can occur while fetching authoritative time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// No reply within the link timeout
    Timeout,
    /// The companion answered but has no value yet
    Unavailable,
    /// Reply did not match the request
    Unexpected,
    /// Time fields out of range
    InvalidTime,
    /// DST flag was neither 0 nor 1
    InvalidDst,
    /// Transport read/write failure
    Link,
    /// Malformed frame on the link
    Protocol,
}

/// Source of the authoritative wall-clock time
pub trait TimeSource {
    /// Fetch the current local time
    ///
    /// May block for a bounded timeout.
    fn fetch_time(&mut self) -> Result<TimeSample, SyncError>;
}

/// Source of the daylight-saving flag
pub trait DstSource {
    fn fetch_dst(&mut self) -> Result<DstCorrection, SyncError>;
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn fetch_time(&mut self) -> Result<TimeSample, SyncError> {
        (**self).fetch_time()
    }
}

impl<T: DstSource + ?Sized> DstSource for &mut T {
    fn fetch_dst(&mut self) -> Result<DstCorrection, SyncError> {
        (**self).fetch_dst()
    }
}
