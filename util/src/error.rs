//! Errors raised while building fixture frames

use std::fmt;

use crate::frames::Version;

/// A requested frame cannot be encoded, or a fixture file cannot be written
#[derive(Debug)]
pub enum UtilError {
    Io(std::io::Error),
    /// Layer number outside 1..=3
    BadLayer(u8),
    /// Bitrate missing from the table for this version and layer
    BadBitrate { version: Version, layer: u8, kbps: u32 },
    BadSampleRate { version: Version, hz: u32 },
    /// A free format frame was requested without a length
    MissingLength,
    /// A fixed bitrate was given to the free format builder
    NotFreeFormat(u32),
    /// Free format frame too short to hold a header and a body byte
    FrameTooShort(usize),
}

impl fmt::Display for UtilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilError::Io(err) => write!(f, "fixture I/O failed: {}", err),
            UtilError::BadLayer(layer) => write!(f, "layer {} does not exist", layer),
            UtilError::BadBitrate { version, layer, kbps } => {
                write!(f, "{} kbps is not a {:?} layer {} bitrate", kbps, version, layer)
            }
            UtilError::BadSampleRate { version, hz } => write!(f, "{} Hz is not a {:?} sample rate", hz, version),
            UtilError::MissingLength => write!(f, "free format frames need an explicit length"),
            UtilError::NotFreeFormat(kbps) => write!(f, "free format frames have bitrate 0, got {}", kbps),
            UtilError::FrameTooShort(length) => write!(f, "free format frame of {} bytes is too short", length),
        }
    }
}

impl std::error::Error for UtilError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UtilError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for UtilError {
    fn from(err: std::io::Error) -> Self {
        UtilError::Io(err)
    }
}

pub type UtilResult<T> = std::result::Result<T, UtilError>;
