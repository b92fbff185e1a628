//! MPEG audio frame builders
//!
//! Frames are a valid 4-byte header followed by zero bytes, so a stream of
//! them never contains a stray sync word.

use std::fs;
use std::path::PathBuf;

use crate::error::{UtilError, UtilResult};

/// MPEG version of a synthesized frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

const V1_L1: [u32; 14] = [32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448];
const V1_L2: [u32; 14] = [32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384];
const V1_L3: [u32; 14] = [32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];
const V2_L1: [u32; 14] = [32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256];
const V2_L23: [u32; 14] = [8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160];

impl Version {
    fn bits(self) -> u8 {
        match self {
            Version::Mpeg1 => 0b11,
            Version::Mpeg2 => 0b10,
            Version::Mpeg25 => 0b00,
        }
    }

    fn sample_rates(self) -> [u32; 3] {
        match self {
            Version::Mpeg1 => [44100, 48000, 32000],
            Version::Mpeg2 => [22050, 24000, 16000],
            Version::Mpeg25 => [11025, 12000, 8000],
        }
    }
}

/// Parameters of one synthesized frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec {
    pub version: Version,
    /// Layer number, 1 to 3
    pub layer: u8,
    /// Bitrate in kbps; 0 builds a free format header
    pub bitrate_kbps: u32,
    pub sample_rate: u32,
    pub padding: bool,
}

impl FrameSpec {
    /// MPEG-1 layer III at 44.1 kHz, the common MP3 case
    pub fn mp3(bitrate_kbps: u32) -> Self {
        Self {
            version: Version::Mpeg1,
            layer: 3,
            bitrate_kbps,
            sample_rate: 44100,
            padding: false,
        }
    }

    pub fn with_padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }

    fn bitrates(&self) -> &'static [u32; 14] {
        match (self.version, self.layer) {
            (Version::Mpeg1, 1) => &V1_L1,
            (Version::Mpeg1, 2) => &V1_L2,
            (Version::Mpeg1, _) => &V1_L3,
            (_, 1) => &V2_L1,
            _ => &V2_L23,
        }
    }

    /// Encode the 4-byte header (no CRC, joint stereo, original)
    pub fn header(&self) -> UtilResult<[u8; 4]> {
        if !(1..=3).contains(&self.layer) {
            return Err(UtilError::BadLayer(self.layer));
        }
        let bitrate_index = if self.bitrate_kbps == 0 {
            0
        } else {
            self.bitrates()
                .iter()
                .position(|&rate| rate == self.bitrate_kbps)
                .map(|i| i as u8 + 1)
                .ok_or(UtilError::BadBitrate {
                    version: self.version,
                    layer: self.layer,
                    kbps: self.bitrate_kbps,
                })?
        };
        let sample_rate_index = self
            .version
            .sample_rates()
            .iter()
            .position(|&rate| rate == self.sample_rate)
            .ok_or(UtilError::BadSampleRate {
                version: self.version,
                hz: self.sample_rate,
            })? as u8;
        let layer_bits = 4 - self.layer;

        Ok([
            0xFF,
            0xE0 | (self.version.bits() << 3) | (layer_bits << 1) | 0x1,
            (bitrate_index << 4) | (sample_rate_index << 2) | (u8::from(self.padding) << 1),
            0x44,
        ])
    }

    /// Frame length in bytes from the textbook formula; `None` for free format
    pub fn length(&self) -> Option<usize> {
        if self.bitrate_kbps == 0 {
            return None;
        }
        let bps = self.bitrate_kbps as usize * 1000;
        let rate = self.sample_rate as usize;
        let pad = usize::from(self.padding);
        Some(match (self.version, self.layer) {
            (_, 1) => (12 * bps / rate + pad) * 4,
            (Version::Mpeg1, _) | (_, 2) => 144 * bps / rate + pad,
            _ => 72 * bps / rate + pad,
        })
    }
}

/// Build one frame: header then silence up to the frame length
pub fn build_frame(spec: &FrameSpec) -> UtilResult<Vec<u8>> {
    let length = spec.length().ok_or(UtilError::MissingLength)?;
    let mut frame = spec.header()?.to_vec();
    frame.resize(length, 0);
    Ok(frame)
}

/// Build a free format frame of `length` bytes
pub fn build_free_format_frame(spec: &FrameSpec, length: usize) -> UtilResult<Vec<u8>> {
    if spec.bitrate_kbps != 0 {
        return Err(UtilError::NotFreeFormat(spec.bitrate_kbps));
    }
    if length < 5 {
        return Err(UtilError::FrameTooShort(length));
    }
    let mut frame = spec.header()?.to_vec();
    frame.resize(length, 0);
    Ok(frame)
}

/// Concatenate frames for each spec
pub fn build_stream(specs: &[FrameSpec]) -> UtilResult<Vec<u8>> {
    let mut stream = Vec::new();
    for spec in specs {
        stream.extend(build_frame(spec)?);
    }
    Ok(stream)
}

/// Deterministic filler that never contains 0xFF, so it cannot fake a sync word
pub fn garbage(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 255) as u8
        })
        .collect()
}

/// Write `bytes` to a uniquely named file in the system temp directory
pub fn write_temp_file(name: &str, bytes: &[u8]) -> UtilResult<PathBuf> {
    let dir = std::env::temp_dir().join(format!("vbrinfo-tests-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mp3_header_bytes() {
        assert_eq!(FrameSpec::mp3(128).header().unwrap(), [0xFF, 0xFB, 0x90, 0x44]);
        assert_eq!(FrameSpec::mp3(128).with_padding(true).header().unwrap(), [0xFF, 0xFB, 0x92, 0x44]);
    }

    #[test]
    fn test_lengths() {
        assert_eq!(FrameSpec::mp3(128).length(), Some(417));
        assert_eq!(FrameSpec::mp3(160).length(), Some(522));
        assert_eq!(build_frame(&FrameSpec::mp3(320)).unwrap().len(), 1044);
    }

    #[test]
    fn test_invalid_specs() {
        assert!(matches!(
            FrameSpec::mp3(100).header(),
            Err(UtilError::BadBitrate { layer: 3, kbps: 100, .. })
        ));
        assert!(matches!(build_frame(&FrameSpec::mp3(0)), Err(UtilError::MissingLength)));
        assert!(matches!(
            build_free_format_frame(&FrameSpec::mp3(128), 400),
            Err(UtilError::NotFreeFormat(128))
        ));
        assert!(matches!(
            build_free_format_frame(&FrameSpec::mp3(0), 4),
            Err(UtilError::FrameTooShort(4))
        ));
        let bad_rate = FrameSpec { sample_rate: 44000, ..FrameSpec::mp3(128) };
        assert_eq!(
            bad_rate.header().unwrap_err().to_string(),
            "44000 Hz is not a Mpeg1 sample rate"
        );
        let bad_layer = FrameSpec { layer: 4, ..FrameSpec::mp3(128) };
        assert!(matches!(bad_layer.header(), Err(UtilError::BadLayer(4))));
    }

    #[test]
    fn test_garbage_has_no_sync_byte() {
        let filler = garbage(10_000, 7);
        assert_eq!(filler.len(), 10_000);
        assert!(!filler.contains(&0xFF));
        assert_eq!(filler, garbage(10_000, 7));
    }
}
