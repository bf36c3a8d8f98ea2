//! Time-sync sources

pub mod serial;

pub use serial::SerialSyncLink;
