//! Move-to-Front Transform.
//!
//! MTF transforms a stream by replacing each byte with its position in a
//! recency table. After each byte, that byte is moved to the front of the
//! table. Runs of equal bytes, which the BWT produces in bulk, become runs of
//! zeros.
//!
//! The table is a flat 256-entry array. Moving an entry to the front shifts
//! the entries before it up by one, so both directions cost O(256) per byte
//! at worst.

use log::debug;
use oxibwt_core::channel::{ChannelReader, ChannelWriter};
use oxibwt_core::{Result, StreamTransform};
use std::io::{Read, Write};

/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 256;

/// Recency ranking of all 256 byte values.
///
/// Always a permutation of `0..=255`; operations only reorder it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: [u8; ALPHABET_SIZE],
}

impl SymbolTable {
    /// Table in ascending byte order.
    pub fn new() -> Self {
        let mut symbols = [0u8; ALPHABET_SIZE];
        for (i, s) in symbols.iter_mut().enumerate() {
            *s = i as u8;
        }
        Self { symbols }
    }

    /// Restore ascending byte order.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current ordering, most recent first.
    pub fn as_slice(&self) -> &[u8] {
        &self.symbols
    }

    /// Byte currently at `rank`.
    #[inline]
    pub fn symbol_at(&self, rank: u8) -> u8 {
        self.symbols[rank as usize]
    }

    /// Current rank of `byte`.
    #[inline]
    pub fn rank_of(&self, byte: u8) -> u8 {
        // Always found: the table holds every byte value
        let pos = self
            .symbols
            .iter()
            .position(|&s| s == byte)
            .expect("MTF: byte must exist in 0-255 table");
        pos as u8
    }

    /// Move the entry at `rank` to the front.
    #[inline]
    fn promote(&mut self, rank: u8) {
        let rank = rank as usize;
        if rank > 0 {
            let byte = self.symbols[rank];
            self.symbols.copy_within(0..rank, 1);
            self.symbols[0] = byte;
        }
    }

    /// True if every byte value appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; ALPHABET_SIZE];
        for &s in &self.symbols {
            if seen[s as usize] {
                return false;
            }
            seen[s as usize] = true;
        }
        true
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Move-to-front coder for one stream.
///
/// Encoding and decoding both mutate the table, so one instance serves one
/// stream in one direction. Call [`reset`](Self::reset) before reusing it.
#[derive(Debug, Clone, Default)]
pub struct MoveToFront {
    table: SymbolTable,
}

impl MoveToFront {
    /// Create a coder with the table in ascending order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stream.
    pub fn reset(&mut self) {
        self.table.reset();
    }

    /// Read-only view of the current table.
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Encode one byte to its current rank.
    #[inline]
    pub fn encode_byte(&mut self, byte: u8) -> u8 {
        let rank = self.table.rank_of(byte);
        self.table.promote(rank);
        rank
    }

    /// Decode one rank back to its byte.
    #[inline]
    pub fn decode_byte(&mut self, rank: u8) -> u8 {
        let byte = self.table.symbol_at(rank);
        self.table.promote(rank);
        byte
    }

    /// Encode a run of bytes, continuing the current stream.
    pub fn encode_slice(&mut self, data: &[u8]) -> Vec<u8> {
        data.iter().map(|&b| self.encode_byte(b)).collect()
    }

    /// Decode a run of ranks, continuing the current stream.
    pub fn decode_slice(&mut self, ranks: &[u8]) -> Vec<u8> {
        ranks.iter().map(|&r| self.decode_byte(r)).collect()
    }
}

/// Perform Move-to-Front transform on a fresh stream.
pub fn encode(data: &[u8]) -> Vec<u8> {
    MoveToFront::new().encode_slice(data)
}

/// Perform inverse Move-to-Front transform on a fresh stream.
pub fn decode(ranks: &[u8]) -> Vec<u8> {
    MoveToFront::new().decode_slice(ranks)
}

/// MTF as a stream transform, one byte at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveToFrontCodec;

impl StreamTransform for MoveToFrontCodec {
    fn name(&self) -> &'static str {
        "mtf"
    }

    fn forward<R: Read, W: Write>(
        &self,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()> {
        let mut mtf = MoveToFront::new();
        while let Some(byte) = input.read_byte()? {
            output.write_byte(mtf.encode_byte(byte))?;
        }
        debug!("mtf encode: {} bytes", input.bytes_read());
        Ok(())
    }

    fn inverse<R: Read, W: Write>(
        &self,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()> {
        let mut mtf = MoveToFront::new();
        while let Some(rank) = input.read_byte()? {
            output.write_byte(mtf.decode_byte(rank))?;
        }
        debug!("mtf decode: {} bytes", input.bytes_read());
        Ok(())
    }
}
