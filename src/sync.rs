//! Frame synchronization
//!
//! `FrameScanner` pulls bytes from a [`ByteStream`] and yields one
//! [`FrameHeader`] per frame found. Scanning is byte by byte: a candidate
//! sync word whose header does not decode is dropped and the search resumes
//! one byte later. No CRC checks are made.

use std::io::Read;

use crate::error::Result;
use crate::header::FrameHeader;
use crate::stream::ByteStream;
use crate::tables::HEADER_SIZE;

/// Synchronizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Looking for the next valid header
    Seeking,
    /// Positioned just past a frame whose header was delivered
    Synced,
    /// Waiting on a refill before a decision can be made
    InsufficientData,
    /// End of stream reached, or the reader failed
    Stopped,
}

/// Outcome of examining the pending bytes
#[derive(Debug, PartialEq, Eq)]
enum Scan {
    /// A frame starts `skip` bytes in and spans `length` bytes
    Frame {
        skip: usize,
        header: FrameHeader,
        length: usize,
    },
    /// Drop `skip` bytes, then refill
    NeedMore { skip: usize },
    /// No further frame can start in the remaining bytes
    Exhausted { skip: usize },
}

/// Pull-based MPEG audio frame scanner
pub struct FrameScanner<R> {
    stream: ByteStream<R>,
    state: SyncState,
    /// Bytes of the last frame that were not buffered when it was delivered
    discard: usize,
    frames: u64,
    bytes_skipped: u64,
    position: u64,
}

impl<R: Read> FrameScanner<R> {
    pub fn new(stream: ByteStream<R>) -> Self {
        Self {
            stream,
            state: SyncState::Seeking,
            discard: 0,
            frames: 0,
            bytes_skipped: 0,
            position: 0,
        }
    }

    /// Return the next frame header, or `None` once the stream is exhausted
    ///
    /// After `None` or an error the scanner is stopped and keeps returning `None`.
    pub fn next_header(&mut self) -> Result<Option<FrameHeader>> {
        loop {
            if self.state == SyncState::Stopped {
                return Ok(None);
            }
            if self.state == SyncState::Synced {
                self.state = SyncState::Seeking;
            }

            if self.discard > 0 {
                let available = self.stream.unconsumed().len().min(self.discard);
                self.advance(available);
                self.discard -= available;
                if self.discard > 0 {
                    if self.stream.is_eof() {
                        self.stop();
                    } else {
                        self.refill()?;
                    }
                    continue;
                }
            }

            let scan = locate(self.stream.unconsumed(), self.stream.is_eof(), self.stream.is_full());
            match scan {
                Scan::Frame { skip, header, length } => {
                    self.skip(skip);
                    let available = self.stream.unconsumed().len().min(length);
                    self.advance(available);
                    self.discard = length - available;
                    self.frames += 1;
                    self.state = SyncState::Synced;
                    return Ok(Some(header));
                }
                Scan::NeedMore { skip } => {
                    self.skip(skip);
                    self.refill()?;
                }
                Scan::Exhausted { skip } => {
                    self.skip(skip);
                    self.stop();
                }
            }
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Frames delivered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Bytes dropped while searching for sync
    pub fn bytes_skipped(&self) -> u64 {
        self.bytes_skipped
    }

    /// Absolute stream offset of the cursor
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_stream(self) -> ByteStream<R> {
        self.stream
    }

    fn refill(&mut self) -> Result<()> {
        self.state = SyncState::InsufficientData;
        if let Err(err) = self.stream.refill() {
            self.state = SyncState::Stopped;
            return Err(err);
        }
        self.state = SyncState::Seeking;
        Ok(())
    }

    fn skip(&mut self, count: usize) {
        self.bytes_skipped += count as u64;
        self.advance(count);
    }

    fn advance(&mut self, count: usize) {
        self.stream.consume(count);
        self.position += count as u64;
    }

    fn stop(&mut self) {
        self.state = SyncState::Stopped;
        log::debug!(
            "scan finished: {} frames, {} bytes skipped, {} bytes read",
            self.frames,
            self.bytes_skipped,
            self.position
        );
    }
}

impl<R: Read> Iterator for FrameScanner<R> {
    type Item = Result<FrameHeader>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_header().transpose()
    }
}

fn is_sync(bytes: &[u8]) -> bool {
    bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0
}

/// Find the earliest frame in `pending`
///
/// `eof` means no more bytes will arrive; `full` means a refill cannot add
/// any because `pending` already fills the buffer.
fn locate(pending: &[u8], eof: bool, full: bool) -> Scan {
    let len = pending.len();
    let mut offset = 0;

    while offset + HEADER_SIZE <= len {
        if !is_sync(&pending[offset..]) {
            offset += 1;
            continue;
        }

        let header = match FrameHeader::parse(&pending[offset..]) {
            Ok(header) => header,
            Err(err) => {
                log::trace!("rejected candidate at +{}: {}", offset, err);
                offset += 1;
                continue;
            }
        };

        let available = len - offset;
        // Waiting only helps if dropping the bytes before this candidate
        // frees room, or the buffer is not yet full.
        let can_wait = !eof && (offset > 0 || !full);

        match header.frame_length() {
            Some(length) => {
                if length <= available || !can_wait {
                    return Scan::Frame { skip: offset, header, length };
                }
                return Scan::NeedMore { skip: offset };
            }
            None => match next_free_format_frame(&header, &pending[offset..]) {
                Some(length) => return Scan::Frame { skip: offset, header, length },
                None if eof => return Scan::Frame { skip: offset, header, length: available },
                None if can_wait => return Scan::NeedMore { skip: offset },
                None => {
                    log::trace!("free format candidate at +{} has no successor", offset);
                    offset += 1;
                }
            },
        }
    }

    if eof {
        Scan::Exhausted { skip: len }
    } else {
        Scan::NeedMore { skip: offset }
    }
}

/// Length of a free format frame, found as the distance to the next header
/// of the same stream (same version, layer and sample rate)
fn next_free_format_frame(header: &FrameHeader, frame: &[u8]) -> Option<usize> {
    (HEADER_SIZE + 1..frame.len().saturating_sub(HEADER_SIZE - 1))
        .filter(|&offset| is_sync(&frame[offset..]))
        .find(|&offset| {
            FrameHeader::parse(&frame[offset..])
                .map(|next| header.same_stream(&next))
                .unwrap_or(false)
        })
}
