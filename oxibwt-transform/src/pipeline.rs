//! BWT followed by MTF on a single block.
//!
//! This is the full preprocessing path ahead of an entropy coder. The wire
//! layout matches a BWT block, with the last column replaced by its
//! move-to-front ranks.

use log::debug;
use oxibwt_core::channel::{ChannelReader, ChannelWriter};
use oxibwt_core::{Result, StreamTransform};
use std::io::{Read, Write};

use crate::bwt::{self, BwtBlock};
use crate::mtf;

/// A block after both transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedBlock {
    /// Sorted position of the original rotation.
    pub first_index: u32,
    /// MTF ranks of the BWT last column.
    pub ranks: Vec<u8>,
}

impl RankedBlock {
    /// Write the block in wire format.
    pub fn write_to<W: Write>(&self, output: &mut ChannelWriter<W>) -> Result<()> {
        output.write_int(self.first_index)?;
        output.write_bytes(&self.ranks)
    }

    /// Read one block in wire format, or `None` at end of stream.
    pub fn read_from<R: Read>(input: &mut ChannelReader<R>) -> Result<Option<Self>> {
        Ok(BwtBlock::read_from(input)?.map(|block| Self {
            first_index: block.first_index,
            ranks: block.last_column,
        }))
    }
}

/// Run BWT then MTF over `block`.
pub fn encode(block: &[u8]) -> Result<RankedBlock> {
    let bwt = bwt::forward(block)?;
    let ranks = mtf::encode(&bwt.last_column);
    debug!(
        "pipeline encode: {} bytes, {} zero ranks",
        ranks.len(),
        ranks.iter().filter(|&&r| r == 0).count()
    );
    Ok(RankedBlock {
        first_index: bwt.first_index,
        ranks,
    })
}

/// Undo MTF then BWT.
pub fn decode(block: &RankedBlock) -> Result<Vec<u8>> {
    let last_column = mtf::decode(&block.ranks);
    bwt::inverse(block.first_index, &last_column)
}

/// The combined pipeline as a stream transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl StreamTransform for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn forward<R: Read, W: Write>(
        &self,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()> {
        let block = input.read_block()?;
        if block.is_empty() {
            return Ok(());
        }
        encode(&block)?.write_to(output)
    }

    fn inverse<R: Read, W: Write>(
        &self,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()> {
        match RankedBlock::read_from(input)? {
            Some(block) => output.write_bytes(&decode(&block)?),
            None => Ok(()),
        }
    }
}
