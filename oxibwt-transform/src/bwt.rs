//! Burrows-Wheeler Transform.
//!
//! The BWT is a reversible permutation of a block that groups bytes sharing
//! a following context, making the data more compressible.
//!
//! **Forward:** rank the circular rotations with [`CircularSuffixArray`],
//! then emit for each sorted rotation the byte that precedes it, plus the
//! sorted position of rotation 0. The rotation matrix is never built.
//!
//! **Inverse:** a stable counting sort of the last column recovers the
//! first column's correspondence with it (`next[]`). Following `next[]` from
//! the row of rotation 0 visits the rotations in block order.
//!
//! On the wire a block is `[4-byte big-endian first index][n bytes last column]`.

use log::debug;
use oxibwt_core::channel::{ChannelReader, ChannelWriter};
use oxibwt_core::{OxiBwtError, Result, StreamTransform};
use std::io::{Read, Write};

use crate::suffix::{CircularSuffixArray, validate_block};

/// Result of a BWT forward transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BwtBlock {
    /// Sorted position of the original rotation (rotation 0).
    pub first_index: u32,
    /// Last column of the sorted rotation matrix.
    pub last_column: Vec<u8>,
}

impl BwtBlock {
    /// Create a block, checking that `first_index` addresses `last_column`.
    pub fn new(first_index: u32, last_column: Vec<u8>) -> Result<Self> {
        check_first_index(first_index, last_column.len())?;
        Ok(Self {
            first_index,
            last_column,
        })
    }

    /// Length of the block.
    pub fn len(&self) -> usize {
        self.last_column.len()
    }

    /// True if the last column is empty.
    pub fn is_empty(&self) -> bool {
        self.last_column.is_empty()
    }

    /// Reconstruct the original block.
    pub fn invert(&self) -> Result<Vec<u8>> {
        inverse(self.first_index, &self.last_column)
    }

    /// Write the block in wire format.
    pub fn write_to<W: Write>(&self, output: &mut ChannelWriter<W>) -> Result<()> {
        output.write_int(self.first_index)?;
        output.write_bytes(&self.last_column)
    }

    /// Read one block in wire format.
    ///
    /// Returns `None` if the stream is already at its end. A header without
    /// data, a cut-short header or a first index past the data is a
    /// `MalformedStream`.
    pub fn read_from<R: Read>(input: &mut ChannelReader<R>) -> Result<Option<Self>> {
        if input.is_eof()? {
            return Ok(None);
        }

        let header_offset = input.bytes_read();
        let first_index = input.read_int()?;
        let data_offset = input.bytes_read();
        let last_column = input.read_block()?;

        if last_column.is_empty() {
            return Err(OxiBwtError::malformed(
                data_offset,
                "truncated block: header without data",
            ));
        }
        if first_index as usize >= last_column.len() {
            return Err(OxiBwtError::malformed(
                header_offset,
                format!(
                    "first index {first_index} out of range for block of {} bytes",
                    last_column.len()
                ),
            ));
        }

        Ok(Some(Self {
            first_index,
            last_column,
        }))
    }
}

fn check_first_index(first_index: u32, n: usize) -> Result<()> {
    if n == 0 {
        return Err(OxiBwtError::invalid_input("last column is empty"));
    }
    if first_index as usize >= n {
        return Err(OxiBwtError::invalid_input(format!(
            "first index {first_index} out of range for block of {n} bytes"
        )));
    }
    Ok(())
}

/// Perform the forward Burrows-Wheeler Transform.
pub fn forward(block: &[u8]) -> Result<BwtBlock> {
    let csa = CircularSuffixArray::new(block)?;
    forward_with_order(block, &csa)
}

/// Perform the forward transform using an already ranked block.
///
/// `csa` must have been built from `block`; only the length is checked.
pub fn forward_with_order(block: &[u8], csa: &CircularSuffixArray) -> Result<BwtBlock> {
    validate_block(block)?;
    let n = block.len();
    if csa.len() != n {
        return Err(OxiBwtError::invalid_input(format!(
            "suffix order has {} entries for a block of {n} bytes",
            csa.len()
        )));
    }

    let mut first_index = None;
    let mut last_column = Vec::with_capacity(n);
    for (k, &rotation) in csa.order().iter().enumerate() {
        if rotation == 0 {
            first_index = Some(k as u32);
            last_column.push(block[n - 1]);
        } else {
            last_column.push(block[rotation - 1]);
        }
    }

    let first_index = first_index
        .ok_or_else(|| OxiBwtError::invariant("rotation 0 missing from suffix order"))?;
    debug!("bwt forward: {n} bytes, first index {first_index}");

    Ok(BwtBlock {
        first_index,
        last_column,
    })
}

/// Perform the inverse Burrows-Wheeler Transform.
pub fn inverse(first_index: u32, last_column: &[u8]) -> Result<Vec<u8>> {
    check_first_index(first_index, last_column.len())?;
    validate_block(last_column)?;

    let n = last_column.len();
    let next = build_next(last_column);

    // Row `first_index` starts with block[0]; that byte sits in the last
    // column at next[first_index].
    let mut output = Vec::with_capacity(n);
    let mut cur = next[first_index as usize] as usize;
    for _ in 0..n {
        output.push(last_column[cur]);
        cur = next[cur] as usize;
    }

    debug!("bwt inverse: {n} bytes, first index {first_index}");
    Ok(output)
}

/// Key-indexed counting over the last column.
///
/// `next[rank]` is the last-column position of the byte that sorts to
/// `rank` in the first column. Equal bytes keep their last-column order.
fn build_next(last_column: &[u8]) -> Vec<u32> {
    let mut starts = [0usize; 257];
    for &byte in last_column {
        starts[byte as usize + 1] += 1;
    }
    for r in 0..256 {
        starts[r + 1] += starts[r];
    }

    let mut next = vec![0u32; last_column.len()];
    for (i, &byte) in last_column.iter().enumerate() {
        let slot = &mut starts[byte as usize];
        next[*slot] = i as u32;
        *slot += 1;
    }
    next
}

/// Forward-transform independent blocks on the rayon thread pool.
///
/// Results are in input order. The first failing block aborts the batch.
#[cfg(feature = "parallel")]
pub fn forward_blocks_parallel(blocks: &[&[u8]]) -> Result<Vec<BwtBlock>> {
    use rayon::prelude::*;

    debug!("bwt forward: {} blocks in parallel", blocks.len());
    blocks.par_iter().map(|block| forward(block)).collect()
}

/// Invert independent blocks on the rayon thread pool.
#[cfg(feature = "parallel")]
pub fn inverse_blocks_parallel(blocks: &[BwtBlock]) -> Result<Vec<Vec<u8>>> {
    use rayon::prelude::*;

    debug!("bwt inverse: {} blocks in parallel", blocks.len());
    blocks.par_iter().map(BwtBlock::invert).collect()
}

/// The BWT as a stream transform: one block per stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurrowsWheeler;

impl StreamTransform for BurrowsWheeler {
    fn name(&self) -> &'static str {
        "bwt"
    }

    fn forward<R: Read, W: Write>(
        &self,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()> {
        let block = input.read_block()?;
        if block.is_empty() {
            debug!("bwt forward: empty stream");
            return Ok(());
        }
        forward(&block)?.write_to(output)
    }

    fn inverse<R: Read, W: Write>(
        &self,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()> {
        match BwtBlock::read_from(input)? {
            Some(block) => output.write_bytes(&block.invert()?),
            None => {
                debug!("bwt inverse: empty stream");
                Ok(())
            }
        }
    }
}
