//! Time base abstraction

/// Free-running millisecond counter
///
/// Mirrors the classic `millis()` contract: the value starts near zero at
/// boot and wraps around at `u32::MAX` (about 49.7 days). Consumers must
/// compare instants with `wrapping_sub`, never with `<`.
pub trait MillisClock {
    /// Milliseconds since an arbitrary epoch, modulo 2^32
    fn now_ms(&self) -> u32;

    /// Milliseconds elapsed since `earlier`, correct across one wraparound
    fn elapsed_since(&self, earlier: u32) -> u32 {
        self.now_ms().wrapping_sub(earlier)
    }
}

impl<T: MillisClock + ?Sized> MillisClock for &T {
    fn now_ms(&self) -> u32 {
        T::now_ms(self)
    }
}
