//! # parley_core
//!
//! Core domain logic for Parley.

pub mod booking;
pub mod completion;
pub mod scheduling;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
