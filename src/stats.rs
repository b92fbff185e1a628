//! Per-file bitrate statistics
//!
//! Pure bookkeeping: every observed frame bumps the frame count, the
//! running sum and one histogram bucket. Known bitrates also move the
//! minimum and maximum.

use crate::tables::MAX_BITRATE;

/// Number of histogram slots; slot 0 is the overflow bucket
const HISTOGRAM_LEN: usize = MAX_BITRATE as usize + 1;

/// Index of the bucket holding free format and out-of-range bitrates
const UNKNOWN_BUCKET: usize = 0;

/// Running statistics over the frames of one stream
#[derive(Debug, Clone, PartialEq)]
pub struct BitrateStats {
    frames: u64,
    min: Option<u32>,
    max: Option<u32>,
    /// Sum of per-frame bitrates in kbps
    total: f64,
    histogram: [u64; HISTOGRAM_LEN],
}

impl Default for BitrateStats {
    fn default() -> Self {
        Self {
            frames: 0,
            min: None,
            max: None,
            total: 0.0,
            histogram: [0; HISTOGRAM_LEN],
        }
    }
}

impl BitrateStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame's bitrate (kbps, 0 for free format) into the totals
    pub fn observe(&mut self, bitrate_kbps: u32) {
        self.frames += 1;
        self.total += f64::from(bitrate_kbps);

        if bitrate_kbps == 0 || bitrate_kbps > MAX_BITRATE {
            self.histogram[UNKNOWN_BUCKET] += 1;
        } else {
            self.histogram[bitrate_kbps as usize] += 1;
        }

        if bitrate_kbps == 0 {
            return;
        }
        self.min = Some(self.min.map_or(bitrate_kbps, |min| min.min(bitrate_kbps)));
        self.max = Some(self.max.map_or(bitrate_kbps, |max| max.max(bitrate_kbps)));
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Lowest known bitrate seen, `None` before any
    pub fn min(&self) -> Option<u32> {
        self.min
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Arithmetic mean of per-frame bitrates; `None` when no frames were seen
    pub fn average(&self) -> Option<f64> {
        if self.frames == 0 {
            None
        } else {
            Some(self.total / self.frames as f64)
        }
    }

    /// Populated `(kbps, frames)` buckets in ascending bitrate order
    pub fn buckets(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.histogram
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, count)| **count > 0)
            .map(|(kbps, &count)| (kbps as u32, count))
    }

    /// Frames whose bitrate was free format or above the histogram ceiling
    pub fn unknown(&self) -> u64 {
        self.histogram[UNKNOWN_BUCKET]
    }
}
