//! Audible chime trait

/// Something that can emit a short audible tone
///
/// Called exactly once per hour rollover. Implementations block for the
/// length of the tone.
pub trait Chime {
    fn chime(&mut self);
}

impl<T: Chime + ?Sized> Chime for &mut T {
    fn chime(&mut self) {
        (**self).chime()
    }
}
