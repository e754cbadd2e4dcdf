//! Block transforms for OxiBWT.
//!
//! This crate provides the reversible preprocessing stages that sit in front
//! of an entropy coder:
//! 1. Circular suffix ranking - sorted order of all rotations of a block
//! 2. Burrows-Wheeler Transform (BWT) - last column of the sorted rotations
//! 3. Move-to-Front Transform (MTF) - recency ranks, turning runs into zeros
//!
//! Each stage is also exposed as a [`StreamTransform`](oxibwt_core::StreamTransform)
//! so it can run over a byte channel.
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_transform::{bwt, mtf};
//!
//! let out = bwt::forward(b"ABRACADABRA!").unwrap();
//! assert_eq!(out.first_index, 3);
//! assert_eq!(out.last_column, b"ARD!RCAAAABB");
//!
//! let ranks = mtf::encode(&out.last_column);
//! let column = mtf::decode(&ranks);
//! assert_eq!(bwt::inverse(out.first_index, &column).unwrap(), b"ABRACADABRA!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bwt;
pub mod mtf;
pub mod pipeline;
pub mod suffix;

pub use bwt::{BurrowsWheeler, BwtBlock};
pub use mtf::{MoveToFront, MoveToFrontCodec, SymbolTable};
pub use pipeline::{Pipeline, RankedBlock};
pub use suffix::{CircularSuffixArray, RankingStrategy};

#[cfg(feature = "parallel")]
pub use bwt::{forward_blocks_parallel, inverse_blocks_parallel};

/// Largest block the transforms accept.
///
/// The first index travels as a 4-byte integer, so a block can hold at most
/// `u32::MAX` rotations.
pub const MAX_BLOCK_LEN: usize = u32::MAX as usize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_path() {
        let block = b"mississippi river";
        let csa = CircularSuffixArray::new(block).unwrap();
        let out = bwt::forward_with_order(block, &csa).unwrap();
        let ranks = mtf::encode(&out.last_column);

        let column = mtf::decode(&ranks);
        let recovered = bwt::inverse(out.first_index, &column).unwrap();
        assert_eq!(recovered, block.as_slice());
    }

    #[test]
    fn test_boundary_single_byte() {
        let out = bwt::forward(&[0x42]).unwrap();
        assert_eq!(out, BwtBlock::new(0, vec![0x42]).unwrap());
    }
}
