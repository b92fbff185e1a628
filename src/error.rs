//! Error types for vbrinfo
//!
//! This module defines all error types used throughout the crate,
//! one enum per concern plus a top-level error for the binary.

use thiserror::Error;

/// Main error type for frame scanning and reporting
#[derive(Debug, Error)]
pub enum VbrError {
    /// Reading the input or writing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command line configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Memory allocation failures
    #[error("Memory allocation failed")]
    Memory,

    /// Writing or reading a diagnostics report failed
    #[cfg(feature = "diagnostics")]
    #[error("Diagnostics error: {0}")]
    Diagnostics(String),
}

/// Frame header decoding errors
///
/// Every variant marks a reserved or undefined field value. The scanner
/// treats any of them as a spurious sync point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Fewer than four header bytes were supplied
    #[error("Truncated header: {0} bytes available, 4 required")]
    Truncated(usize),

    /// The first 11 bits are not all set
    #[error("No sync word: found 0x{0:03X}, expected 0x7FF")]
    NoSync(u16),

    /// Version bits `01`
    #[error("Reserved MPEG version bits")]
    ReservedVersion,

    /// Layer bits `00`
    #[error("Reserved layer bits")]
    ReservedLayer,

    /// Bitrate index 15
    #[error("Bad bitrate index {0}")]
    BadBitrate(u8),

    /// Sample rate index 3
    #[error("Reserved sample rate index {0}")]
    ReservedSampleRate(u8),

    /// Emphasis bits `10`
    #[error("Reserved emphasis bits")]
    ReservedEmphasis,
}

/// Command line validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `-h` was given
    #[error("Help requested")]
    HelpRequested,

    /// No input files were named
    #[error("No input files given")]
    MissingInput,

    /// `-p` value was negative, too large or not a number
    #[error("precision must be a non-negative integer no greater than 65535")]
    InvalidPrecision(String),

    /// An option that takes a value was last on the command line
    #[error("option requires an argument -- '{0}'")]
    MissingArgument(char),

    /// Unrecognized option letter
    #[error("invalid option -- '{0}'")]
    UnknownOption(char),
}

/// Specialized result types for different modules
pub type HeaderResult<T> = std::result::Result<T, HeaderError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type Result<T> = std::result::Result<T, VbrError>;
