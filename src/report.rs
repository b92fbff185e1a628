//! Text output for analyzed files

use std::io::{self, Write};
use std::path::Path;

use crate::config::{ReportConfig, MAX_PRECISION};
use crate::stats::BitrateStats;

/// Printed in place of the average when a file has no frames
pub const NO_FRAMES: &str = "n/a";

/// Format an average bitrate with `precision` fractional digits
///
/// Trailing zeros are trimmed, then a trailing decimal point, so an exact
/// integer prints without one. `None` (no frames) prints as [`NO_FRAMES`].
/// Precision is capped at [`MAX_PRECISION`].
pub fn format_average(average: Option<f64>, precision: usize) -> String {
    let Some(average) = average else {
        return NO_FRAMES.to_string();
    };

    let mut text = format!("{:.*}", precision.min(MAX_PRECISION), average);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0');
        let keep = trimmed.strip_suffix('.').unwrap_or(trimmed).len();
        text.truncate(keep);
    }
    text
}

/// Writes per-file report blocks
pub struct Reporter<W: Write> {
    out: W,
    config: ReportConfig,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, config: ReportConfig) -> Self {
        Self { out, config }
    }

    /// First line of a file's block
    pub fn heading(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "VBR information for {}:", path.display())
    }

    /// One line per frame, only in verbose mode
    pub fn frame(&mut self, index: u64, bitrate_kbps: u32) -> io::Result<()> {
        if self.config.verbose {
            writeln!(self.out, "  Frame {}: {}", index, bitrate_kbps)?;
        }
        Ok(())
    }

    /// Summary and histogram for a finished file, as configured
    pub fn finish(&mut self, stats: &BitrateStats) -> io::Result<()> {
        if self.config.summary {
            self.summary(stats)?;
        }
        if self.config.histogram {
            self.histogram(stats)?;
        }
        Ok(())
    }

    pub fn summary(&mut self, stats: &BitrateStats) -> io::Result<()> {
        writeln!(self.out, "  Minimum bitrate: {}", stats.min().unwrap_or(0))?;
        writeln!(self.out, "  Maximum bitrate: {}", stats.max().unwrap_or(0))?;
        writeln!(
            self.out,
            "  Average bitrate: {}",
            format_average(stats.average(), self.config.precision)
        )
    }

    pub fn histogram(&mut self, stats: &BitrateStats) -> io::Result<()> {
        writeln!(self.out, "  Histogram:")?;
        for (kbps, count) in stats.buckets() {
            writeln!(self.out, "    {}\t{:6}", kbps, count)?;
        }
        if stats.unknown() > 0 {
            writeln!(self.out, "    unknown\t{}", stats.unknown())?;
        }
        Ok(())
    }

    /// Blank line between file blocks
    pub fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
