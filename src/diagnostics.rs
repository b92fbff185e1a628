//! JSON reports for analyzed files
//!
//! Each analyzed file can be saved as a pretty-printed JSON document for
//! later comparison between runs.
//!
//! This module is only available when the "diagnostics" feature is enabled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, VbrError};
use crate::stats::BitrateStats;

/// Environment variable naming the directory reports are written to
pub const DIAGNOSTICS_DIR_ENV: &str = "VBRINFO_DIAGNOSTICS_DIR";

/// Statistics for one analyzed file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub analyzed_at: DateTime<Utc>,
    pub frames: u64,
    pub min_bitrate: Option<u32>,
    pub max_bitrate: Option<u32>,
    pub average_bitrate: Option<f64>,
    pub bytes_skipped: u64,
    /// Populated `(kbps, frames)` buckets in ascending order
    pub histogram: Vec<(u32, u64)>,
    pub unknown_frames: u64,
}

impl FileReport {
    pub fn new(path: &Path, stats: &BitrateStats, bytes_skipped: u64) -> Self {
        Self {
            path: path.to_path_buf(),
            analyzed_at: Utc::now(),
            frames: stats.frames(),
            min_bitrate: stats.min(),
            max_bitrate: stats.max(),
            average_bitrate: stats.average(),
            bytes_skipped,
            histogram: stats.buckets().collect(),
            unknown_frames: stats.unknown(),
        }
    }

    /// File name used inside the report directory
    fn file_name(&self) -> String {
        let stem = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stream".to_string());
        format!("{}-{}.json", stem, self.analyzed_at.format("%Y%m%dT%H%M%S%.3f"))
    }
}

/// Save `report` as JSON inside `dir`, returning the written path
pub fn save_report(dir: &Path, report: &FileReport) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(report).map_err(|e| VbrError::Diagnostics(e.to_string()))?;
    let path = dir.join(report.file_name());
    let mut file = File::create(&path)?;
    file.write_all(json.as_bytes())?;
    log::info!("Diagnostics report saved to: {}", path.display());
    Ok(path)
}

/// Load a report written by [`save_report`]
pub fn load_report(path: &Path) -> Result<FileReport> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| VbrError::Diagnostics(e.to_string()))
}

/// Report directory from the environment, if configured
pub fn report_dir() -> Option<PathBuf> {
    std::env::var_os(DIAGNOSTICS_DIR_ENV).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_round_trips_through_disk() {
        let mut stats = BitrateStats::new();
        for kbps in [128, 160, 0] {
            stats.observe(kbps);
        }
        let report = FileReport::new(Path::new("album/track01.mp3"), &stats, 10);
        assert_eq!(report.histogram, vec![(128, 1), (160, 1)]);
        assert_eq!(report.unknown_frames, 1);

        let dir = std::env::temp_dir().join(format!("vbrinfo-diagnostics-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = save_report(&dir, &report).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("track01.mp3-"));

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded.frames, 3);
        assert_eq!(loaded.min_bitrate, Some(128));
        assert_eq!(loaded.bytes_skipped, 10);
        assert_eq!(loaded.analyzed_at, report.analyzed_at);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
