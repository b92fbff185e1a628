//! Refillable read buffer over a byte source
//!
//! `ByteStream` keeps one fixed-capacity buffer. Bytes before `start` have
//! been consumed and are dropped on the next refill; bytes in
//! `start..end` are pending.

use std::io::Read;

use crate::error::{Result, VbrError};
use crate::tables::HEADER_SIZE;

/// Read buffer capacity (1 MiB)
pub const BUFFER_SIZE: usize = 1024 * 1024;

/// Streaming reader adapter with a reusable buffer
pub struct ByteStream<R> {
    reader: R,
    buffer: Vec<u8>,
    /// Offset of the first unconsumed byte
    start: usize,
    /// Number of valid bytes in the buffer
    end: usize,
    eof: bool,
}

/// Allocate a zeroed buffer, reporting failure instead of aborting
pub fn allocate_buffer(capacity: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|_| VbrError::Memory)?;
    buffer.resize(capacity, 0);
    Ok(buffer)
}

impl<R: Read> ByteStream<R> {
    /// Create a stream with a freshly allocated buffer of `BUFFER_SIZE`
    pub fn new(reader: R) -> Result<Self> {
        Self::with_capacity(reader, BUFFER_SIZE)
    }

    /// Create a stream with a buffer of `capacity` bytes, at least one header
    pub fn with_capacity(reader: R, capacity: usize) -> Result<Self> {
        Ok(Self::with_buffer(reader, allocate_buffer(capacity.max(HEADER_SIZE))?))
    }

    /// Create a stream over a previously used allocation
    ///
    /// The buffer's length is its capacity; stale contents are ignored.
    /// A buffer shorter than a frame header is grown to `HEADER_SIZE`, so a
    /// full buffer always holds a complete candidate header.
    pub fn with_buffer(reader: R, mut buffer: Vec<u8>) -> Self {
        if buffer.len() < HEADER_SIZE {
            buffer.resize(HEADER_SIZE, 0);
        }
        Self {
            reader,
            buffer,
            start: 0,
            end: 0,
            eof: false,
        }
    }

    /// Give the allocation back for reuse with the next file
    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    /// Move pending bytes to the front and read once into the free space
    ///
    /// Returns the number of valid bytes now buffered. A read that yields
    /// nothing marks end of stream. Short reads are not retried.
    pub fn refill(&mut self) -> Result<usize> {
        if self.start > 0 {
            self.buffer.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }

        if self.end == self.buffer.len() || self.eof {
            return Ok(self.end);
        }

        let read = self.reader.read(&mut self.buffer[self.end..])?;
        if read == 0 {
            self.eof = true;
        }
        self.end += read;

        log::debug!("refill: read {} bytes, {} buffered, eof={}", read, self.end, self.eof);
        Ok(self.end)
    }

    /// Bytes buffered but not yet consumed
    pub fn unconsumed(&self) -> &[u8] {
        &self.buffer[self.start..self.end]
    }

    /// Mark `count` pending bytes as consumed
    ///
    /// Consuming more than is pending clamps to the pending length.
    pub fn consume(&mut self, count: usize) {
        self.start = (self.start + count).min(self.end);
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// True when pending bytes fill the whole buffer so a refill cannot add more
    pub fn is_full(&self) -> bool {
        self.end - self.start == self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Reader that hands out at most `chunk` bytes per call
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        chunk: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_empty_reader_hits_eof() {
        let mut stream = ByteStream::with_capacity(Cursor::new(Vec::new()), 16).unwrap();
        assert_eq!(stream.refill().unwrap(), 0);
        assert!(stream.is_eof());
        assert!(stream.unconsumed().is_empty());
    }

    #[test]
    fn test_refill_shifts_pending_bytes() {
        let data: Vec<u8> = (0..20).collect();
        let mut stream = ByteStream::with_capacity(Cursor::new(data), 8).unwrap();

        assert_eq!(stream.refill().unwrap(), 8);
        assert_eq!(stream.unconsumed(), &[0, 1, 2, 3, 4, 5, 6, 7]);

        stream.consume(6);
        assert_eq!(stream.unconsumed(), &[6, 7]);

        assert_eq!(stream.refill().unwrap(), 8);
        assert_eq!(stream.unconsumed(), &[6, 7, 8, 9, 10, 11, 12, 13]);
    }

    #[test]
    fn test_short_reads_are_not_retried() {
        let reader = Trickle { data: vec![7; 10], pos: 0, chunk: 3 };
        let mut stream = ByteStream::with_capacity(reader, 8).unwrap();
        assert_eq!(stream.refill().unwrap(), 3);
        assert_eq!(stream.refill().unwrap(), 6);
        assert!(!stream.is_eof());
    }

    #[test]
    fn test_full_buffer_skips_read() {
        let mut stream = ByteStream::with_capacity(Cursor::new(vec![1u8; 32]), 4).unwrap();
        stream.refill().unwrap();
        assert!(stream.is_full());
        assert_eq!(stream.refill().unwrap(), 4);
        assert!(!stream.is_eof());
    }

    #[test]
    fn test_consume_clamps() {
        let mut stream = ByteStream::with_capacity(Cursor::new(vec![1u8, 2, 3]), 8).unwrap();
        stream.refill().unwrap();
        stream.consume(100);
        assert!(stream.unconsumed().is_empty());
    }

    #[test]
    fn test_capacity_holds_at_least_one_header() {
        for capacity in 0..HEADER_SIZE {
            let stream = ByteStream::with_capacity(Cursor::new(vec![0u8; 10]), capacity).unwrap();
            assert_eq!(stream.capacity(), HEADER_SIZE);
        }
        let stream = ByteStream::with_buffer(Cursor::new(Vec::new()), Vec::new());
        assert_eq!(stream.capacity(), HEADER_SIZE);
        let stream = ByteStream::with_capacity(Cursor::new(Vec::new()), 64).unwrap();
        assert_eq!(stream.capacity(), 64);
    }

    #[test]
    fn test_buffer_round_trips_between_streams() {
        let first = ByteStream::with_capacity(Cursor::new(vec![9u8; 4]), 8).unwrap();
        let buffer = first.into_buffer();
        assert_eq!(buffer.len(), 8);

        let mut second = ByteStream::with_buffer(Cursor::new(vec![1u8, 2]), buffer);
        assert_eq!(second.refill().unwrap(), 2);
        assert_eq!(second.unconsumed(), &[1, 2]);
    }
}
