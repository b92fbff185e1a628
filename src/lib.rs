//! # vbrinfo
//!
//! Variable bitrate statistics for MPEG audio streams (MPEG-1, MPEG-2 and
//! MPEG-2.5, layers I to III). Only frame headers are decoded: the scanner
//! locates each frame, reads its bitrate and skips the body by length.
//!
//! ```no_run
//! use std::fs::File;
//! use vbrinfo::{BitrateStats, ByteStream, FrameScanner};
//!
//! # fn main() -> vbrinfo::Result<()> {
//! let stream = ByteStream::new(File::open("song.mp3")?)?;
//! let mut stats = BitrateStats::new();
//! for header in FrameScanner::new(stream) {
//!     stats.observe(header?.bitrate_kbps);
//! }
//! println!("{} frames, average {:?} kbps", stats.frames(), stats.average());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod header;
pub mod report;
pub mod session;
pub mod stats;
pub mod stream;
pub mod sync;
pub mod tables;

#[cfg(feature = "diagnostics")]
pub mod diagnostics;

pub use cli::{Args, USAGE};
pub use config::ReportConfig;
pub use error::{ConfigError, HeaderError, Result, VbrError};
pub use header::{ChannelMode, Emphasis, FrameHeader, Layer, MpegVersion};
pub use report::{format_average, Reporter};
pub use session::DecodeSession;
pub use stats::BitrateStats;
pub use stream::{allocate_buffer, ByteStream, BUFFER_SIZE};
pub use sync::{FrameScanner, SyncState};
