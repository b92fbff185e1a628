//! Lookup tables and constants for MPEG audio frame headers
//!
//! This module contains the static tables required to turn raw header
//! indices into bitrates, sample rates and frame sizes (ISO/IEC 11172-3
//! and 13818-3).

/// Sample rates for different MPEG versions
/// Index: version_row * 3 + sample_rate_index, see [`sample_rate_row`]
pub const SAMPLE_RATES: [u32; 9] = [
    44100, 48000, 32000, // MPEG-1
    22050, 24000, 16000, // MPEG-2
    11025, 12000, 8000,  // MPEG-2.5
];

/// Bitrate table in kbps
/// Index: [bitrate_index][column] where column comes from [`bitrate_column`]:
/// 0=V1 L1, 1=V1 L2, 2=V1 L3, 3=V2/2.5 L1, 4=V2/2.5 L2, 5=V2/2.5 L3.
/// Row 0000 is free format, row 1111 is forbidden.
pub const BITRATES: [[i32; 6]; 16] = [
    [0, 0, 0, 0, 0, 0],                 // 0000
    [32, 32, 32, 32, 8, 8],             // 0001
    [64, 48, 40, 48, 16, 16],           // 0010
    [96, 56, 48, 56, 24, 24],           // 0011
    [128, 64, 56, 64, 32, 32],          // 0100
    [160, 80, 64, 80, 40, 40],          // 0101
    [192, 96, 80, 96, 48, 48],          // 0110
    [224, 112, 96, 112, 56, 56],        // 0111
    [256, 128, 112, 128, 64, 64],       // 1000
    [288, 160, 128, 144, 80, 80],       // 1001
    [320, 192, 160, 160, 96, 96],       // 1010
    [352, 224, 192, 176, 112, 112],     // 1011
    [384, 256, 224, 192, 128, 128],     // 1100
    [416, 320, 256, 224, 144, 144],     // 1101
    [448, 384, 320, 256, 160, 160],     // 1110
    [-1, -1, -1, -1, -1, -1],           // 1111
];

/// Bitrate index meaning "free format"
pub const FREE_FORMAT_INDEX: u8 = 0;

/// Bitrate index that is never valid
pub const BAD_BITRATE_INDEX: u8 = 15;

/// Sample rate index that is reserved in every version
pub const RESERVED_SAMPLE_RATE_INDEX: u8 = 3;

/// Size of a frame header in bytes
pub const HEADER_SIZE: usize = 4;

/// Bytes per slot for layer I frames; layers II and III use one-byte slots
pub const LAYER1_SLOT_SIZE: usize = 4;

/// Highest bitrate in any table; also the histogram ceiling
pub const MAX_BITRATE: u32 = 448;

/// Row into [`SAMPLE_RATES`] for a two-bit version field
///
/// Returns `None` for the reserved `01` pattern.
pub fn sample_rate_row(version_bits: u8) -> Option<usize> {
    match version_bits & 0x3 {
        0b11 => Some(0), // MPEG-1
        0b10 => Some(1), // MPEG-2
        0b00 => Some(2), // MPEG-2.5
        _ => None,
    }
}

/// Column into [`BITRATES`] for a version row and a layer number (1..=3)
pub fn bitrate_column(version_row: usize, layer: u8) -> usize {
    let base = if version_row == 0 { 0 } else { 3 };
    base + (layer as usize - 1)
}

/// Samples carried by one frame
pub fn samples_per_frame(version_row: usize, layer: u8) -> u32 {
    match (version_row, layer) {
        (_, 1) => 384,
        (0, _) => 1152,
        (_, 2) => 1152,
        _ => 576, // layer III, MPEG-2 and MPEG-2.5
    }
}

/// Frame length coefficient: bytes = coefficient * bitrate / sample_rate
/// (in slots for layer I, bytes otherwise)
pub fn frame_size_coefficient(version_row: usize, layer: u8) -> u32 {
    match (version_row, layer) {
        (_, 1) => 12,
        (0, _) | (_, 2) => 144,
        _ => 72,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitrate_rows_are_ascending() {
        for column in 0..6 {
            for index in 2..15 {
                assert!(
                    BITRATES[index][column] > BITRATES[index - 1][column],
                    "column {} not ascending at index {}",
                    column,
                    index
                );
            }
        }
    }

    #[test]
    fn test_max_bitrate_covers_tables() {
        let max = BITRATES.iter().flatten().copied().max().unwrap_or(0);
        assert_eq!(max as u32, MAX_BITRATE);
    }

    #[test]
    fn test_version_rows() {
        assert_eq!(sample_rate_row(0b11), Some(0));
        assert_eq!(sample_rate_row(0b10), Some(1));
        assert_eq!(sample_rate_row(0b00), Some(2));
        assert_eq!(sample_rate_row(0b01), None);
        assert_eq!(SAMPLE_RATES[sample_rate_row(0b00).unwrap() * 3 + 2], 8000);
    }

    #[test]
    fn test_samples_per_frame() {
        assert_eq!(samples_per_frame(0, 1), 384);
        assert_eq!(samples_per_frame(0, 2), 1152);
        assert_eq!(samples_per_frame(0, 3), 1152);
        assert_eq!(samples_per_frame(1, 3), 576);
        assert_eq!(samples_per_frame(2, 2), 1152);
    }
}
