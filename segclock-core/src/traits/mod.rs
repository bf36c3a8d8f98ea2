//! Hardware abstraction traits
//!
//! These traits define the interface between the clock logic and the
//! collaborators that own real hardware or external links.

pub mod chime;
pub mod display;
pub mod sync;

pub use chime::Chime;
pub use display::DisplayDriver;
pub use sync::{DstSource, SyncError, TimeSource};
