//! Digit encoding for the shift-register chain

pub mod frame;
pub mod glyph;
pub mod merge;

pub use frame::{Dataframe, Field, FRAME_LEN};
pub use glyph::{glyph, lookup, try_lookup, Glyph, GlyphError, Symbol, GLYPH_COUNT};
pub use merge::{encode_field, encode_symbols, merge_active_low_masks, split_digits};
