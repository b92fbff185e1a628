//! Per-file analysis
//!
//! A `DecodeSession` owns the scanner and statistics for one input. It is
//! created when the file is opened and dropped after its report is written;
//! only the read buffer outlives it, handed back by [`DecodeSession::into_buffer`].

use std::io::{Read, Write};

use crate::error::{Result, VbrError};
use crate::report::Reporter;
use crate::stats::BitrateStats;
use crate::stream::ByteStream;
use crate::sync::FrameScanner;

/// Scanner plus running statistics for a single stream
pub struct DecodeSession<R> {
    scanner: FrameScanner<R>,
    stats: BitrateStats,
}

impl<R: Read> DecodeSession<R> {
    /// Start a session reading from `reader` into a reused `buffer`
    pub fn new(reader: R, buffer: Vec<u8>) -> Self {
        Self {
            scanner: FrameScanner::new(ByteStream::with_buffer(reader, buffer)),
            stats: BitrateStats::new(),
        }
    }

    /// Scan the whole stream, folding every frame into the statistics
    ///
    /// Verbose frame lines go to `reporter` as frames are found. A read
    /// error ends the scan like end of stream does and is only logged;
    /// a failed write to the reporter is returned.
    pub fn run<W: Write>(&mut self, reporter: &mut Reporter<W>) -> Result<()> {
        loop {
            match self.scanner.next_header() {
                Ok(Some(header)) => {
                    reporter.frame(self.stats.frames(), header.bitrate_kbps)?;
                    self.stats.observe(header.bitrate_kbps);
                }
                Ok(None) => break,
                Err(VbrError::Io(err)) => {
                    log::warn!("read failed after {} bytes, stopping scan: {}", self.scanner.position(), err);
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> &BitrateStats {
        &self.stats
    }

    /// Bytes dropped while searching for frame headers
    pub fn bytes_skipped(&self) -> u64 {
        self.scanner.bytes_skipped()
    }

    /// Bytes consumed from the stream so far
    pub fn bytes_read(&self) -> u64 {
        self.scanner.position()
    }

    /// End the session, returning the read buffer for the next file
    pub fn into_buffer(self) -> Vec<u8> {
        self.scanner.into_stream().into_buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::stream::allocate_buffer;
    use std::io::{self, Cursor};

    const MPEG1_L3_128K: [u8; 4] = [0xFF, 0xFB, 0x90, 0x44];

    /// Yields `data`, then fails every read
    struct Failing {
        data: Cursor<Vec<u8>>,
    }

    impl Read for Failing {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device gone")),
                n => Ok(n),
            }
        }
    }

    fn frame_128k() -> Vec<u8> {
        let mut bytes = MPEG1_L3_128K.to_vec();
        bytes.resize(417, 0);
        bytes
    }

    #[test]
    fn test_run_collects_stats_and_verbose_lines() {
        let mut data = frame_128k();
        data.extend(frame_128k());

        let mut reporter = Reporter::new(Vec::new(), ReportConfig::new(true, false, false, 3));
        let mut session = DecodeSession::new(Cursor::new(data), allocate_buffer(4096).unwrap());
        session.run(&mut reporter).unwrap();

        assert_eq!(session.stats().frames(), 2);
        assert_eq!(session.bytes_read(), 834);
        assert_eq!(session.bytes_skipped(), 0);
        assert_eq!(
            String::from_utf8(reporter.into_inner()).unwrap(),
            "  Frame 0: 128\n  Frame 1: 128\n"
        );
    }

    #[test]
    fn test_read_error_keeps_partial_stats() {
        let mut data = frame_128k();
        data.extend_from_slice(&MPEG1_L3_128K);
        let reader = Failing { data: Cursor::new(data) };

        let mut reporter = Reporter::new(Vec::new(), ReportConfig::default());
        let mut session = DecodeSession::new(reader, allocate_buffer(4096).unwrap());
        session.run(&mut reporter).unwrap();

        assert_eq!(session.stats().frames(), 1);
        assert_eq!(session.stats().min(), Some(128));
    }

    #[test]
    fn test_buffer_is_returned() {
        let session = DecodeSession::new(Cursor::new(Vec::new()), allocate_buffer(128).unwrap());
        assert_eq!(session.into_buffer().len(), 128);
    }
}
