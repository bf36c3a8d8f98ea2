//! Time sync over a framed UART link
//!
//! The clock sends a request frame and waits for a single reply from the
//! companion. Replies carry UTC; the link converts them to local standard
//! time with a fixed offset. Daylight saving is left to the caller.

use embedded_io::{Read, ReadReady, Write};
use segclock_core::time::{DstCorrection, TimeSample};
use segclock_core::traits::{DstSource, SyncError, TimeSource};
use segclock_hal::MillisClock;
use segclock_protocol::{FrameParser, SyncReply, SyncRequest};

/// Upper bound on stale bytes discarded before a request
const MAX_DRAIN: usize = 256;

/// Blocking request/reply client for the sync companion
pub struct SerialSyncLink<U, K> {
    uart: U,
    clock: K,
    parser: FrameParser,
    timeout_ms: u32,
    utc_offset_s: i32,
}

impl<U, K> SerialSyncLink<U, K>
where
    U: Read + Write + ReadReady,
    K: MillisClock,
{
    pub fn new(uart: U, clock: K, timeout_ms: u32, utc_offset_s: i32) -> Self {
        Self {
            uart,
            clock,
            parser: FrameParser::new(),
            timeout_ms,
            utc_offset_s,
        }
    }

    /// Send a request and wait for its reply
    pub fn request(&mut self, request: SyncRequest) -> Result<SyncReply, SyncError> {
        self.drain()?;
        self.parser.reset();

        let bytes = request
            .to_frame()
            .encode_to_vec()
            .map_err(|_| SyncError::Protocol)?;
        self.uart.write_all(&bytes).map_err(|_| SyncError::Link)?;
        self.uart.flush().map_err(|_| SyncError::Link)?;

        let start = self.clock.now_ms();
        loop {
            if self.uart.read_ready().map_err(|_| SyncError::Link)? {
                let mut byte = [0u8; 1];
                let n = self.uart.read(&mut byte).map_err(|_| SyncError::Link)?;
                if n == 1 {
                    // Noise before the start byte is skipped by the parser
                    match self.parser.feed(byte[0]) {
                        Ok(Some(frame)) => {
                            return SyncReply::from_frame(&frame).map_err(|_| SyncError::Protocol)
                        }
                        Ok(None) => {}
                        Err(_) => return Err(SyncError::Protocol),
                    }
                }
            }
            if self.clock.elapsed_since(start) >= self.timeout_ms {
                return Err(SyncError::Timeout);
            }
        }
    }

    /// Drop anything left over from an earlier, timed-out exchange
    fn drain(&mut self) -> Result<(), SyncError> {
        let mut byte = [0u8; 1];
        for _ in 0..MAX_DRAIN {
            if !self.uart.read_ready().map_err(|_| SyncError::Link)? {
                break;
            }
            self.uart.read(&mut byte).map_err(|_| SyncError::Link)?;
        }
        Ok(())
    }

    pub fn release(self) -> (U, K) {
        (self.uart, self.clock)
    }
}

impl<U, K> TimeSource for SerialSyncLink<U, K>
where
    U: Read + Write + ReadReady,
    K: MillisClock,
{
    fn fetch_time(&mut self) -> Result<TimeSample, SyncError> {
        match self.request(SyncRequest::Time)? {
            SyncReply::Time {
                hour,
                minute,
                second,
            } => TimeSample::from_utc(hour, minute, second, self.utc_offset_s),
            SyncReply::Nak => Err(SyncError::Unavailable),
            SyncReply::Dst { .. } => Err(SyncError::Unexpected),
        }
    }
}

impl<U, K> DstSource for SerialSyncLink<U, K>
where
    U: Read + Write + ReadReady,
    K: MillisClock,
{
    fn fetch_dst(&mut self) -> Result<DstCorrection, SyncError> {
        match self.request(SyncRequest::Dst)? {
            SyncReply::Dst { flag } => DstCorrection::from_byte(flag),
            SyncReply::Nak => Err(SyncError::Unavailable),
            SyncReply::Time { .. } => Err(SyncError::Unexpected),
        }
    }
}
