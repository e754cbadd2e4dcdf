//! Byte channel for reading and writing transform streams.
//!
//! The transforms themselves work on in-memory blocks. This module is the
//! boundary where those blocks meet a device: `ChannelReader` hands out single
//! bytes, big-endian integers and whole blocks, and `ChannelWriter` writes
//! them back. Both keep a running byte count so wire-format errors can report
//! where they happened.
//!
//! # Example
//!
//! ```
//! use oxibwt_core::channel::{ChannelReader, ChannelWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = ChannelWriter::new(&mut output);
//!     writer.write_int(3).unwrap();
//!     writer.write_bytes(b"ARD!").unwrap();
//!     writer.flush().unwrap();
//! }
//!
//! let mut reader = ChannelReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_int().unwrap(), 3);
//! assert_eq!(reader.read_block().unwrap(), b"ARD!");
//! assert!(reader.is_eof().unwrap());
//! ```

use crate::error::{OxiBwtError, Result};
use std::io::{ErrorKind, Read, Write};

/// A byte-level reader that wraps any `Read` implementation.
///
/// End of stream is reported as `Ok(None)` from [`read_byte`](Self::read_byte)
/// rather than as an error; only reads that need more data than remains
/// (such as a 4-byte integer cut short) fail.
#[derive(Debug)]
pub struct ChannelReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// One byte of lookahead filled by `is_eof`.
    peeked: Option<u8>,
    /// Total bytes handed out (for error reporting).
    total_bytes_read: u64,
}

impl<R: Read> ChannelReader<R> {
    /// Create a new `ChannelReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            total_bytes_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `ChannelReader` and return the underlying reader.
    ///
    /// A byte held in lookahead is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.total_bytes_read
    }

    fn fill(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a single byte, or `None` at end of stream.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let byte = match self.peeked.take() {
            Some(b) => Some(b),
            None => self.fill()?,
        };
        if byte.is_some() {
            self.total_bytes_read += 1;
        }
        Ok(byte)
    }

    /// Check whether the stream is exhausted without consuming anything.
    pub fn is_eof(&mut self) -> Result<bool> {
        if self.peeked.is_some() {
            return Ok(false);
        }
        self.peeked = self.fill()?;
        Ok(self.peeked.is_none())
    }

    /// Read a 4-byte big-endian integer.
    ///
    /// Fails with `MalformedStream` if the stream ends before all four
    /// bytes arrive.
    pub fn read_int(&mut self) -> Result<u32> {
        let start = self.total_bytes_read;
        let mut value = 0u32;
        for got in 0..4 {
            match self.read_byte()? {
                Some(b) => value = (value << 8) | b as u32,
                None => {
                    return Err(OxiBwtError::malformed(
                        start,
                        format!("truncated integer: got {got} of 4 bytes"),
                    ));
                }
            }
        }
        Ok(value)
    }

    /// Read everything up to end of stream as one block.
    ///
    /// Block boundaries come from external framing; without it the rest of
    /// the stream is the block. Returns an empty vector at end of stream.
    pub fn read_block(&mut self) -> Result<Vec<u8>> {
        let mut block = Vec::new();
        if let Some(b) = self.peeked.take() {
            block.push(b);
        }
        self.reader.read_to_end(&mut block)?;
        self.total_bytes_read += block.len() as u64;
        Ok(block)
    }
}

/// A byte-level writer that wraps any `Write` implementation.
///
/// Call `flush()` when done. Dropping the writer flushes on a best-effort
/// basis and discards any error.
#[derive(Debug)]
pub struct ChannelWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Total bytes written.
    total_bytes_written: u64,
}

impl<W: Write> ChannelWriter<W> {
    /// Create a new `ChannelWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            total_bytes_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume this `ChannelWriter` and return the underlying writer.
    ///
    /// This flushes before returning the writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        // Use ManuallyDrop to prevent Drop from running (we already flushed)
        let this = std::mem::ManuallyDrop::new(self);
        // SAFETY: `this` is never used or dropped again, so moving the writer out is sound
        Ok(unsafe { std::ptr::read(&this.writer) })
    }

    /// Get the total number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.total_bytes_written
    }

    /// Write a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.writer.write_all(&[byte])?;
        self.total_bytes_written += 1;
        Ok(())
    }

    /// Write a 4-byte big-endian integer.
    pub fn write_int(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write bytes directly to the stream.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.writer.write_all(buf)?;
        self.total_bytes_written += buf.len() as u64;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for ChannelWriter<W> {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_byte_until_eof() {
        let mut reader = ChannelReader::new(Cursor::new(vec![0x41, 0x42]));
        assert_eq!(reader.read_byte().unwrap(), Some(0x41));
        assert_eq!(reader.read_byte().unwrap(), Some(0x42));
        assert_eq!(reader.read_byte().unwrap(), None);
        assert_eq!(reader.read_byte().unwrap(), None);
        assert_eq!(reader.bytes_read(), 2);
    }

    #[test]
    fn test_read_int_big_endian() {
        let mut reader = ChannelReader::new(Cursor::new(vec![0x00, 0x00, 0x01, 0x02]));
        assert_eq!(reader.read_int().unwrap(), 0x0102);
    }

    #[test]
    fn test_read_int_truncated() {
        let mut reader = ChannelReader::new(Cursor::new(vec![0x00, 0x01]));
        let err = reader.read_int().unwrap_err();
        match err {
            OxiBwtError::MalformedStream { offset, message } => {
                assert_eq!(offset, 0);
                assert!(message.contains("2 of 4"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_is_eof_keeps_lookahead() {
        let mut reader = ChannelReader::new(Cursor::new(vec![0x7F]));
        assert!(!reader.is_eof().unwrap());
        assert!(!reader.is_eof().unwrap());
        assert_eq!(reader.bytes_read(), 0);
        assert_eq!(reader.read_byte().unwrap(), Some(0x7F));
        assert!(reader.is_eof().unwrap());
    }

    #[test]
    fn test_read_block_after_peek() {
        let mut reader = ChannelReader::new(Cursor::new(b"hello".to_vec()));
        assert!(!reader.is_eof().unwrap());
        assert_eq!(reader.read_block().unwrap(), b"hello");
        assert_eq!(reader.bytes_read(), 5);
        assert!(reader.read_block().unwrap().is_empty());
    }

    #[test]
    fn test_writer_counts_and_order() {
        let mut output = Vec::new();
        {
            let mut writer = ChannelWriter::new(&mut output);
            writer.write_int(0xDEADBEEF).unwrap();
            writer.write_byte(0x01).unwrap();
            writer.write_bytes(&[0x02, 0x03]).unwrap();
            assert_eq!(writer.bytes_written(), 7);
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_into_inner() {
        let mut writer = ChannelWriter::new(Vec::new());
        writer.write_byte(9).unwrap();
        let inner = writer.into_inner().unwrap();
        assert_eq!(inner, vec![9]);
    }

    #[test]
    fn test_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer = ChannelWriter::new(&mut output);
            writer.write_int(11).unwrap();
            writer.write_bytes(b"ARD!RCAAAABB").unwrap();
            writer.flush().unwrap();
        }

        let mut reader = ChannelReader::new(Cursor::new(&output));
        assert_eq!(reader.read_int().unwrap(), 11);
        assert_eq!(reader.read_block().unwrap(), b"ARD!RCAAAABB");
        assert_eq!(reader.bytes_read(), 16);
    }
}
