//! Cascaded shift-register display chain
//!
//! Six serial-in/parallel-out registers (74HC595 or similar) are chained
//! data-out to data-in, one register per Dataframe byte. The chain is
//! bit-banged over three GPIO lines and latched once per frame so the
//! outputs never show a half-shifted image.
//!
//! # Timing
//!
//! ```text
//! LATCH ‾‾\________________ ... ______________/‾‾
//! CLOCK ____/‾\_/‾\_/‾\____ ... _/‾\_____________
//! DATA  ==X b0 X b1 X b2 X= ... X b7 X===========
//! ```
//!
//! Bytes go out in frame order, each least-significant bit first. Data is
//! sampled on the rising clock edge.

use embedded_hal::delay::DelayNs;
use segclock_core::display::Dataframe;
use segclock_core::traits::DisplayDriver;
use segclock_hal::OutputPin;

/// Three-wire shift-register chain
pub struct ShiftRegisterChain<D, C, L, T> {
    data: D,
    clock: C,
    latch: L,
    delay: T,
    /// Half period of the shift clock
    bit_delay_us: u32,
}

impl<D, C, L, T> ShiftRegisterChain<D, C, L, T>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    T: DelayNs,
{
    /// Create a new chain and park the bus lines
    ///
    /// Latch idles high, clock and data idle low.
    pub fn new(data: D, clock: C, latch: L, delay: T, bit_delay_us: u32) -> Self {
        let mut chain = Self {
            data,
            clock,
            latch,
            delay,
            bit_delay_us,
        };
        chain.data.set_low();
        chain.clock.set_low();
        chain.latch.set_high();
        chain
    }

    /// Shift one byte, least-significant bit first
    fn shift_byte(&mut self, byte: u8) {
        for bit in 0..8 {
            self.data.set_state(byte & (1 << bit) != 0);
            self.clock.set_high();
            self.delay.delay_us(self.bit_delay_us);
            self.clock.set_low();
            self.delay.delay_us(self.bit_delay_us);
        }
    }

    /// Shift raw bytes and latch them
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.latch.set_low();
        for &byte in bytes {
            self.shift_byte(byte);
        }
        self.latch.set_high();
    }

    /// Release the pins
    pub fn release(self) -> (D, C, L, T) {
        (self.data, self.clock, self.latch, self.delay)
    }
}

impl<D, C, L, T> DisplayDriver for ShiftRegisterChain<D, C, L, T>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    T: DelayNs,
{
    fn present(&mut self, frame: &Dataframe) {
        self.write_bytes(frame.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Data,
        Clock,
        Latch,
    }

    /// Shared record of every pin write, in order
    type Bus = RefCell<Vec<(Line, bool)>>;

    /// Mock GPIO pin that logs its writes onto the shared bus
    struct MockPin<'a> {
        line: Line,
        high: bool,
        bus: &'a Bus,
    }

    impl<'a> MockPin<'a> {
        fn new(line: Line, bus: &'a Bus) -> Self {
            Self {
                line,
                high: false,
                bus,
            }
        }
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) {
            self.high = true;
            self.bus.borrow_mut().push((self.line, true));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.bus.borrow_mut().push((self.line, false));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    fn chain(bus: &Bus) -> ShiftRegisterChain<MockPin<'_>, MockPin<'_>, MockPin<'_>, MockDelay> {
        ShiftRegisterChain::new(
            MockPin::new(Line::Data, bus),
            MockPin::new(Line::Clock, bus),
            MockPin::new(Line::Latch, bus),
            MockDelay::default(),
            1,
        )
    }

    /// Decode the bytes seen by the registers from the write log
    fn sampled_bytes(log: &[(Line, bool)]) -> Vec<u8> {
        let mut data = false;
        let mut bits = Vec::new();
        for &(line, level) in log {
            match (line, level) {
                (Line::Data, l) => data = l,
                (Line::Clock, true) => bits.push(data),
                _ => {}
            }
        }
        bits.chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << i))
            })
            .collect()
    }

    #[test]
    fn test_new_parks_bus() {
        let bus = Bus::default();
        let chain = chain(&bus);
        assert!(chain.latch.is_set_high());
        assert!(!chain.clock.is_set_high());
        assert!(!chain.data.is_set_high());
    }

    #[test]
    fn test_present_shifts_frame_lsb_first() {
        let bus = Bus::default();
        let mut chain = chain(&bus);
        bus.borrow_mut().clear();

        let frame = Dataframe::from_bytes([0xE4, 0xD2, 0x42, 0x8C, 0x11, 0x81]);
        chain.present(&frame);

        let log = bus.borrow();
        assert_eq!(sampled_bytes(&log), frame.as_bytes().to_vec());
    }

    #[test]
    fn test_present_is_framed_by_latch() {
        let bus = Bus::default();
        let mut chain = chain(&bus);
        bus.borrow_mut().clear();

        chain.present(&Dataframe::blank());

        let log = bus.borrow();
        assert_eq!(log.first(), Some(&(Line::Latch, false)));
        assert_eq!(log.last(), Some(&(Line::Latch, true)));

        let latch_writes = log.iter().filter(|(l, _)| *l == Line::Latch).count();
        assert_eq!(latch_writes, 2);

        let rising_edges = log.iter().filter(|e| **e == (Line::Clock, true)).count();
        assert_eq!(rising_edges, 48);
    }

    #[test]
    fn test_single_bit_order() {
        let bus = Bus::default();
        let mut chain = chain(&bus);
        bus.borrow_mut().clear();

        chain.write_bytes(&[0x01]);

        // First clocked bit is the LSB
        let log = bus.borrow();
        let first_data = log.iter().find(|(l, _)| *l == Line::Data);
        assert_eq!(first_data, Some(&(Line::Data, true)));
        assert_eq!(sampled_bytes(&log), vec![0x01]);
    }

    #[test]
    fn test_clock_delay_per_bit() {
        let bus = Bus::default();
        let mut chain = chain(&bus);

        chain.write_bytes(&[0xAA, 0x55]);
        let (_, _, _, delay) = chain.release();
        // Two 1 us half periods per bit
        assert_eq!(delay.total_ns, 16 * 2 * 1_000);
    }
}
