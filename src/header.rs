//! MPEG audio frame header decoding
//!
//! Frame header layout (4 bytes, big endian):
//! `AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM`
//!
//! | Bits | Field                                     |
//! |------|-------------------------------------------|
//! | A    | sync (11 bits, all set)                   |
//! | B    | version: 00=2.5, 01=reserved, 10=2, 11=1  |
//! | C    | layer: 00=reserved, 01=III, 10=II, 11=I   |
//! | D    | protection bit (0 means a CRC follows)    |
//! | E    | bitrate index                             |
//! | F    | sample rate index                         |
//! | G    | padding bit                               |
//! | H    | private bit                               |
//! | I    | channel mode                              |
//! | J    | mode extension                            |
//! | K    | copyright                                 |
//! | L    | original                                  |
//! | M    | emphasis                                  |
//!
//! Only the header is decoded. Side information and audio data are skipped
//! using the frame length.

use std::fmt;

use crate::error::{HeaderError, HeaderResult};
use crate::tables::{
    bitrate_column, frame_size_coefficient, sample_rate_row, samples_per_frame, BAD_BITRATE_INDEX,
    BITRATES, FREE_FORMAT_INDEX, HEADER_SIZE, LAYER1_SLOT_SIZE, RESERVED_SAMPLE_RATE_INDEX,
    SAMPLE_RATES,
};

/// Bits that stay constant between frames of one stream:
/// sync, version, layer and sample rate index
const FIXED_FIELDS_MASK: u32 = 0xFFFE_0C00;

/// MPEG version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize, serde::Deserialize))]
pub enum MpegVersion {
    /// MPEG-1 (ISO/IEC 11172-3)
    Mpeg1,
    /// MPEG-2 low sample rates (ISO/IEC 13818-3)
    Mpeg2,
    /// MPEG-2.5, the unofficial extension down to 8 kHz
    Mpeg25,
}

/// Audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    Layer1,
    Layer2,
    Layer3,
}

/// Channel mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

/// De-emphasis to apply on playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize, serde::Deserialize))]
pub enum Emphasis {
    None,
    /// 50/15 microseconds
    Emphasis50_15,
    /// CCITT J.17
    CcittJ17,
}

impl MpegVersion {
    fn row(self) -> usize {
        match self {
            MpegVersion::Mpeg1 => 0,
            MpegVersion::Mpeg2 => 1,
            MpegVersion::Mpeg25 => 2,
        }
    }
}

impl Layer {
    /// Layer number, 1 to 3
    pub fn number(self) -> u8 {
        match self {
            Layer::Layer1 => 1,
            Layer::Layer2 => 2,
            Layer::Layer3 => 3,
        }
    }
}

impl fmt::Display for MpegVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpegVersion::Mpeg1 => write!(f, "MPEG-1"),
            MpegVersion::Mpeg2 => write!(f, "MPEG-2"),
            MpegVersion::Mpeg25 => write!(f, "MPEG-2.5"),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Layer1 => write!(f, "layer I"),
            Layer::Layer2 => write!(f, "layer II"),
            Layer::Layer3 => write!(f, "layer III"),
        }
    }
}

/// Decoded MPEG audio frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub layer: Layer,
    /// True when a 16-bit CRC follows the header
    pub protected: bool,
    /// Bitrate in kbps, 0 for free format
    pub bitrate_kbps: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub padding: bool,
    pub private: bool,
    pub channel_mode: ChannelMode,
    pub mode_extension: u8,
    pub copyright: bool,
    pub original: bool,
    pub emphasis: Emphasis,
    raw: u32,
}

impl FrameHeader {
    /// Decode the first four bytes of `bytes` as a frame header
    pub fn parse(bytes: &[u8]) -> HeaderResult<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(HeaderError::Truncated(bytes.len()));
        }
        let raw = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

        let sync = ((raw >> 21) & 0x7FF) as u16;
        if sync != 0x7FF {
            return Err(HeaderError::NoSync(sync));
        }

        let version_bits = ((raw >> 19) & 0x3) as u8;
        let row = sample_rate_row(version_bits).ok_or(HeaderError::ReservedVersion)?;
        let version = match row {
            0 => MpegVersion::Mpeg1,
            1 => MpegVersion::Mpeg2,
            _ => MpegVersion::Mpeg25,
        };

        let layer = match (raw >> 17) & 0x3 {
            0b11 => Layer::Layer1,
            0b10 => Layer::Layer2,
            0b01 => Layer::Layer3,
            _ => return Err(HeaderError::ReservedLayer),
        };

        let bitrate_index = ((raw >> 12) & 0xF) as u8;
        if bitrate_index == BAD_BITRATE_INDEX {
            return Err(HeaderError::BadBitrate(bitrate_index));
        }
        let bitrate_kbps = if bitrate_index == FREE_FORMAT_INDEX {
            0
        } else {
            BITRATES[bitrate_index as usize][bitrate_column(row, layer.number())] as u32
        };

        let sample_rate_index = ((raw >> 10) & 0x3) as u8;
        if sample_rate_index == RESERVED_SAMPLE_RATE_INDEX {
            return Err(HeaderError::ReservedSampleRate(sample_rate_index));
        }
        let sample_rate = SAMPLE_RATES[row * 3 + sample_rate_index as usize];

        let channel_mode = match (raw >> 6) & 0x3 {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        };

        let emphasis = match raw & 0x3 {
            0 => Emphasis::None,
            1 => Emphasis::Emphasis50_15,
            3 => Emphasis::CcittJ17,
            _ => return Err(HeaderError::ReservedEmphasis),
        };

        Ok(Self {
            version,
            layer,
            protected: (raw >> 16) & 0x1 == 0,
            bitrate_kbps,
            sample_rate,
            padding: (raw >> 9) & 0x1 != 0,
            private: (raw >> 8) & 0x1 != 0,
            channel_mode,
            mode_extension: ((raw >> 4) & 0x3) as u8,
            copyright: (raw >> 3) & 0x1 != 0,
            original: (raw >> 2) & 0x1 != 0,
            emphasis,
            raw,
        })
    }

    /// True for free format frames, whose bitrate is not in the header
    pub fn is_free_format(&self) -> bool {
        self.bitrate_kbps == 0
    }

    pub fn samples_per_frame(&self) -> u32 {
        samples_per_frame(self.version.row(), self.layer.number())
    }

    /// Frame length in bytes, header included
    ///
    /// Free format frames carry no bitrate, so their length can only be
    /// found by locating the next header; this returns `None` for them.
    pub fn frame_length(&self) -> Option<usize> {
        if self.is_free_format() {
            return None;
        }
        let coefficient = frame_size_coefficient(self.version.row(), self.layer.number());
        let slots = (coefficient * self.bitrate_kbps * 1000 / self.sample_rate) as usize;
        let padding = usize::from(self.padding);
        Some(match self.layer {
            Layer::Layer1 => (slots + padding) * LAYER1_SLOT_SIZE,
            _ => slots + padding,
        })
    }

    /// Whether `other` could follow this frame in the same stream
    pub fn same_stream(&self, other: &FrameHeader) -> bool {
        self.raw & FIXED_FIELDS_MASK == other.raw & FIXED_FIELDS_MASK
    }
}
