//! Display output trait

use crate::display::Dataframe;

/// Trait for pushing a display image to the hardware
///
/// Presentation is fire-and-forget. The bus has no acknowledgement channel,
/// so a disconnected chain is indistinguishable from a working one.
pub trait DisplayDriver {
    /// Shift the frame out and latch it
    fn present(&mut self, frame: &Dataframe);
}

impl<T: DisplayDriver + ?Sized> DisplayDriver for &mut T {
    fn present(&mut self, frame: &Dataframe) {
        (**self).present(frame)
    }
}
