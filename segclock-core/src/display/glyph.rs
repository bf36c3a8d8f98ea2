//! Seven-segment glyph table
//!
//! Each two-digit field is wired across two shift-register bytes. The tens
//! digit occupies the high nibble of both bytes, the ones digit the low
//! nibbles (bit 7 on the left):
//!
//! ```text
//!  |--A--|
//!  F     B        byte 0:  dp F A B | G F A B
//!  |--G--|        byte 1:  E  D C G | E D C dp
//!  E     C                  tens      ones
//!  |--D--|  dp
//! ```
//!
//! Masks are active-low: a 0 bit lights the segment (common anode).

/// Number of symbols in the table
pub const GLYPH_COUNT: usize = 17;

/// A symbol that can be shown in one digit position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Symbol {
    D0 = 0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    A,
    B,
    C,
    D,
    E,
    F,
    /// Decimal point only
    Dot,
}

const SYMBOLS: [Symbol; GLYPH_COUNT] = [
    Symbol::D0,
    Symbol::D1,
    Symbol::D2,
    Symbol::D3,
    Symbol::D4,
    Symbol::D5,
    Symbol::D6,
    Symbol::D7,
    Symbol::D8,
    Symbol::D9,
    Symbol::A,
    Symbol::B,
    Symbol::C,
    Symbol::D,
    Symbol::E,
    Symbol::F,
    Symbol::Dot,
];

impl Symbol {
    /// Symbol for a decimal digit; only the last decimal digit is used
    pub const fn digit(n: u8) -> Self {
        SYMBOLS[(n % 10) as usize]
    }

    /// Symbol for a raw table index (0-9, A-F, dot)
    pub fn from_index(index: u8) -> Option<Self> {
        SYMBOLS.get(index as usize).copied()
    }

    /// Table index of this symbol
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Errors from raw glyph lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphError {
    /// Index outside 0..=16
    InvalidSymbol(u8),
}

/// Active-low segment masks for one symbol
///
/// `tens` is the pattern when the symbol sits in the tens position of a
/// field, `ones` when it sits in the ones position. Each covers both bytes
/// of the field; bits belonging to the other position are 1 (off).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    pub tens: [u8; 2],
    pub ones: [u8; 2],
}

const TENS: [[u8; 2]; GLYPH_COUNT] = [
    [0b1000_1111, 0b0001_1111], // 0_
    [0b1110_1111, 0b1101_1111], // 1_
    [0b1100_1111, 0b0010_1111], // 2_
    [0b1100_1111, 0b1000_1111], // 3_
    [0b1010_1111, 0b1100_1111], // 4_
    [0b1001_1111, 0b1000_1111], // 5_
    [0b1001_1111, 0b0000_1111], // 6_
    [0b1100_1111, 0b1101_1111], // 7_
    [0b1000_1111, 0b0000_1111], // 8_
    [0b1000_1111, 0b1000_1111], // 9_
    [0b1000_1111, 0b0100_1111], // A_
    [0b1011_1111, 0b0000_1111], // b_
    [0b1001_1111, 0b0011_1111], // C_
    [0b1110_1111, 0b0000_1111], // d_
    [0b1001_1111, 0b0010_1111], // E_
    [0b1001_1111, 0b0010_1111], // F_
    [0b0111_1111, 0b1111_1111], // ._
];

const ONES: [[u8; 2]; GLYPH_COUNT] = [
    [0b1111_1000, 0b1111_0001], // _0
    [0b1111_1110, 0b1111_1101], // _1
    [0b1111_0100, 0b1111_0011], // _2
    [0b1111_0100, 0b1111_1001], // _3
    [0b1111_0010, 0b1111_1101], // _4
    [0b1111_0001, 0b1111_1001], // _5
    [0b1111_0001, 0b1111_0001], // _6
    [0b1111_1100, 0b1111_1101], // _7
    [0b1111_0000, 0b1111_0001], // _8
    [0b1111_0000, 0b1111_1001], // _9
    [0b1111_0000, 0b1111_0101], // _A
    [0b1111_1011, 0b1111_0001], // _b
    [0b1111_1001, 0b1111_0011], // _C
    [0b1111_0110, 0b1111_0001], // _d
    [0b1111_0001, 0b1111_0011], // _E
    [0b1111_0001, 0b1111_0111], // _F
    [0b1111_1111, 0b1111_1110], // _.
];

/// Glyph for a symbol
pub const fn glyph(symbol: Symbol) -> Glyph {
    let i = symbol as usize;
    Glyph {
        tens: TENS[i],
        ones: ONES[i],
    }
}

/// Glyph for a raw table index
pub fn try_lookup(index: u8) -> Result<Glyph, GlyphError> {
    Symbol::from_index(index)
        .map(glyph)
        .ok_or(GlyphError::InvalidSymbol(index))
}

/// Glyph for a raw table index
///
/// # Panics
///
/// Panics if `index > 16`. Indices come from digit arithmetic, so an
/// out-of-range value is a bug in the caller.
pub fn lookup(index: u8) -> Glyph {
    match try_lookup(index) {
        Ok(g) => g,
        Err(GlyphError::InvalidSymbol(i)) => panic!("invalid glyph symbol {}", i),
    }
}
