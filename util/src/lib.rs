//! Test fixtures for vbrinfo
//!
//! This crate synthesizes MPEG audio frames with silent bodies so tests
//! and benchmarks can build streams without shipping audio files.
//! Frame lengths are computed here independently of the main crate.

pub mod error;
pub mod frames;

// Re-export commonly used functions and types
pub use error::*;
pub use frames::*;
