//! GPIO bookkeeping and output pins
//!
//! The allocator lets the firmware check a whole pin assignment for
//! conflicts before touching any hardware.

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;
use segclock_hal::OutputPin;

use crate::pins::PinError;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// UART0 TX, wired to the sync companion
pub const UART0_TX_PIN: u8 = 0;

/// UART0 RX, wired to the sync companion
pub const UART0_RX_PIN: u8 = 1;

/// Tracks which GPIO numbers are spoken for, one bit per pin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpioAllocator {
    claimed: u32,
}

impl GpioAllocator {
    pub const fn new() -> Self {
        Self { claimed: 0 }
    }

    /// Allocator with the sync UART pins already claimed
    pub const fn with_uart0_reserved() -> Self {
        Self {
            claimed: (1 << UART0_TX_PIN) | (1 << UART0_RX_PIN),
        }
    }

    /// Claim a pin, failing if it is out of range or already claimed
    pub fn allocate(&mut self, pin: u8) -> Result<(), PinError> {
        let bit = Self::bit(pin)?;
        if self.claimed & bit != 0 {
            return Err(PinError::AlreadyTaken);
        }
        self.claimed |= bit;
        Ok(())
    }

    pub fn release(&mut self, pin: u8) {
        if let Ok(bit) = Self::bit(pin) {
            self.claimed &= !bit;
        }
    }

    pub fn is_allocated(&self, pin: u8) -> bool {
        Self::bit(pin).is_ok_and(|bit| self.claimed & bit != 0)
    }

    pub fn allocated_count(&self) -> usize {
        self.claimed.count_ones() as usize
    }

    fn bit(pin: u8) -> Result<u32, PinError> {
        if pin as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        Ok(1 << pin)
    }
}

/// Push-pull output driven through the shared `OutputPin` trait
pub struct GpioOutput<'d> {
    inner: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    /// Configure a pin as output at the given level
    pub fn new(pin: Peri<'d, impl Pin>, initial_high: bool) -> Self {
        let level = if initial_high { Level::High } else { Level::Low };
        Self {
            inner: Output::new(pin, level),
        }
    }
}

impl OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.inner.set_high();
    }

    fn set_low(&mut self) {
        self.inner.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.inner.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_release() {
        let mut alloc = GpioAllocator::new();
        alloc.allocate(2).unwrap();
        alloc.allocate(3).unwrap();
        assert_eq!(alloc.allocated_count(), 2);
        assert_eq!(alloc.allocate(3), Err(PinError::AlreadyTaken));

        alloc.release(3);
        assert!(!alloc.is_allocated(3));
        assert_eq!(alloc.allocate(3), Ok(()));
    }

    #[test]
    fn test_release_out_of_range_is_ignored() {
        let mut alloc = GpioAllocator::new();
        alloc.release(200);
        assert_eq!(alloc.allocated_count(), 0);
        assert!(!alloc.is_allocated(200));
    }

    #[test]
    fn test_out_of_range_pin() {
        let mut alloc = GpioAllocator::new();
        assert!(matches!(alloc.allocate(30), Err(PinError::InvalidPin)));
    }

    #[test]
    fn test_uart0_reserved() {
        let mut alloc = GpioAllocator::with_uart0_reserved();
        assert!(alloc.is_allocated(UART0_TX_PIN));
        assert!(alloc.is_allocated(UART0_RX_PIN));
        assert!(alloc.allocate(0).is_err());
        assert!(alloc.allocate(2).is_ok());
    }
}
