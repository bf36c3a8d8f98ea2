//! Combining a tens and a ones glyph into one field
//!
//! Glyph masks are active-low, so merging is an AND of the stored forms.
//! The work is done on the inverted (active-high) form where the dot
//! overlay is a plain OR, then flipped back once for storage.

use super::frame::Field;
use super::glyph::{glyph, Symbol};

/// Union of the lit segments of two active-low masks
///
/// The result is active-high: a 1 bit is a lit segment.
pub const fn merge_active_low_masks(tens: u8, ones: u8) -> u8 {
    !tens | !ones
}

/// Split a value into its tens and ones digits
///
/// Values above 99 are clamped to 99.
pub const fn split_digits(value: u8) -> (u8, u8) {
    let v = if value > 99 { 99 } else { value };
    ((v / 10) % 10, v % 10)
}

/// Encode two symbols into the stored bytes of a field
pub fn encode_symbols(field: Field, tens: Symbol, ones: Symbol, separator_dot: bool) -> [u8; 2] {
    let t = glyph(tens).tens;
    let o = glyph(ones).ones;
    let mask = field.dot_mask();

    let mut out = [0u8; 2];
    for i in 0..2 {
        let lit = merge_active_low_masks(t[i], o[i]);
        let lit = if separator_dot {
            lit | mask[i]
        } else {
            lit & !mask[i]
        };
        out[i] = !lit;
    }
    out
}

/// Encode a two-digit value into the stored bytes of a field
pub fn encode_field(field: Field, value: u8, separator_dot: bool) -> [u8; 2] {
    let (tens, ones) = split_digits(value);
    encode_symbols(field, Symbol::digit(tens), Symbol::digit(ones), separator_dot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::frame::Dataframe;
    use proptest::prelude::*;

    #[test]
    fn test_merge_masks() {
        assert_eq!(merge_active_low_masks(0xFF, 0xFF), 0x00);
        assert_eq!(merge_active_low_masks(0x0F, 0xF0), 0xFF);
        assert_eq!(merge_active_low_masks(0b1110_1111, 0b1111_1110), 0b0001_0001);
    }

    #[test]
    fn test_split_digits() {
        assert_eq!(split_digits(0), (0, 0));
        assert_eq!(split_digits(7), (0, 7));
        assert_eq!(split_digits(42), (4, 2));
        assert_eq!(split_digits(99), (9, 9));
        assert_eq!(split_digits(100), (9, 9));
        assert_eq!(split_digits(255), (9, 9));
    }

    #[test]
    fn test_encode_12_34_56_with_dots() {
        let mut frame = Dataframe::blank();
        frame.set_field(Field::Hours, encode_field(Field::Hours, 12, true));
        frame.set_field(Field::Minutes, encode_field(Field::Minutes, 34, true));
        frame.set_field(Field::Seconds, encode_field(Field::Seconds, 56, true));

        assert_eq!(frame.as_bytes(), &[0xE4, 0xD2, 0x42, 0x8C, 0x11, 0x81]);
    }

    #[test]
    fn test_encode_without_dots() {
        assert_eq!(encode_field(Field::Hours, 12, false), [0xE4, 0xD3]);
        assert_eq!(encode_field(Field::Minutes, 34, false), [0xC2, 0x8D]);
        assert_eq!(encode_field(Field::Seconds, 56, false), [0x91, 0x81]);
    }

    #[test]
    fn test_encode_zero() {
        // Both digits "0", no dots: every segment lit except G and dp
        assert_eq!(encode_field(Field::Seconds, 0, false), [0x88, 0x11]);
    }

    #[test]
    fn test_encode_matches_dot_overlay() {
        for v in 0..=99u8 {
            for field in Field::ALL {
                let mut frame = Dataframe::blank();
                frame.set_field(field, encode_field(field, v, false));
                frame.overlay_dot(field, true);
                assert_eq!(frame.field(field), encode_field(field, v, true));
            }
        }
    }

    #[test]
    fn test_hex_symbols() {
        let bytes = encode_symbols(Field::Hours, Symbol::A, Symbol::F, false);
        let expected_t = glyph(Symbol::A).tens;
        let expected_o = glyph(Symbol::F).ones;
        assert_eq!(bytes, [expected_t[0] & expected_o[0], expected_t[1] & expected_o[1]]);
    }

    proptest! {
        #[test]
        fn prop_out_of_range_clamps_to_99(v in 100u8..=255, dot in any::<bool>()) {
            for field in Field::ALL {
                prop_assert_eq!(encode_field(field, v, dot), encode_field(field, 99, dot));
            }
        }

        #[test]
        fn prop_digits_recompose(v in 0u8..=99) {
            let (t, o) = split_digits(v);
            prop_assert!(t <= 9 && o <= 9);
            prop_assert_eq!(t * 10 + o, v);
        }

        #[test]
        fn prop_dot_overlay_is_idempotent(v in 0u8..=99) {
            for field in Field::ALL {
                let mut frame = Dataframe::blank();
                frame.set_field(field, encode_field(field, v, true));
                let lit = frame;
                frame.overlay_dot(field, false);
                frame.overlay_dot(field, true);
                frame.overlay_dot(field, true);
                prop_assert_eq!(frame, lit);
            }
        }
    }
}
