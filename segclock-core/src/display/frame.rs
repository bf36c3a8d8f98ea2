//! The six-byte display image
//!
//! Byte order on the bus is hours-high, hours-low, minutes-high,
//! minutes-low, seconds-high, seconds-low. Stored bytes are already
//! active-low and can be shifted out as-is.

/// Number of bytes in a full display image
pub const FRAME_LEN: usize = 6;

/// One two-digit group on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// All fields in bus order
    pub const ALL: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

    /// Index of the field's first byte in the frame
    pub const fn offset(self) -> usize {
        match self {
            Field::Hours => 0,
            Field::Minutes => 2,
            Field::Seconds => 4,
        }
    }

    /// Separator dot bits within the field's two bytes
    ///
    /// The hours dot trails the field, the seconds dot leads it, the
    /// minutes field carries both. There is no dot ahead of the hours.
    pub const fn dot_mask(self) -> [u8; 2] {
        match self {
            Field::Hours => [0x00, 0x01],
            Field::Minutes => [0x80, 0x01],
            Field::Seconds => [0x80, 0x00],
        }
    }
}

/// Full display state, one byte per shift register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dataframe {
    bytes: [u8; FRAME_LEN],
}

impl Default for Dataframe {
    fn default() -> Self {
        Self::blank()
    }
}

impl Dataframe {
    /// All segments off
    pub const fn blank() -> Self {
        Self {
            bytes: [0xFF; FRAME_LEN],
        }
    }

    /// Build a frame from raw active-low bytes
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw bytes in bus order
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// The two stored bytes of a field
    pub fn field(&self, field: Field) -> [u8; 2] {
        let o = field.offset();
        [self.bytes[o], self.bytes[o + 1]]
    }

    /// Replace the two stored bytes of a field
    pub fn set_field(&mut self, field: Field, bytes: [u8; 2]) {
        let o = field.offset();
        self.bytes[o..o + 2].copy_from_slice(&bytes);
    }

    /// Force a field's separator dots on or off without touching its digits
    pub fn overlay_dot(&mut self, field: Field, on: bool) {
        let o = field.offset();
        for (byte, mask) in self.bytes[o..o + 2].iter_mut().zip(field.dot_mask()) {
            // Flip to active-high, set or clear, flip back
            let lit = !*byte;
            let lit = if on { lit | mask } else { lit & !mask };
            *byte = !lit;
        }
    }
}
