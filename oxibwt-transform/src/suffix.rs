//! Circular suffix array.
//!
//! Sorts the n circular rotations of a block without building them. A
//! rotation is named by its starting offset; comparison walks the block
//! modulo n for at most n bytes. Rotations that match on all n bytes (any
//! periodic block, e.g. `"AAAA"` or `"abab"`) are ordered by ascending
//! offset so the result is the same on every run.

use log::{debug, trace};
use oxibwt_core::{OxiBwtError, Result};
use std::cmp::Ordering;

use crate::MAX_BLOCK_LEN;

/// Algorithm used to rank rotations.
///
/// Both produce the same order for every input; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingStrategy {
    /// Iterative rank doubling, O(n log² n).
    #[default]
    PrefixDoubling,
    /// Pairwise rotation comparison, O(n² log n) worst case.
    ///
    /// Fine for short blocks and useful as a cross-check.
    Comparison,
}

/// Sorted order of all circular rotations of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularSuffixArray {
    order: Vec<usize>,
}

impl CircularSuffixArray {
    /// Rank the rotations of `block` with the default strategy.
    pub fn new(block: &[u8]) -> Result<Self> {
        Self::with_strategy(block, RankingStrategy::default())
    }

    /// Rank the rotations of `block` with an explicit strategy.
    pub fn with_strategy(block: &[u8], strategy: RankingStrategy) -> Result<Self> {
        validate_block(block)?;

        let order = match strategy {
            RankingStrategy::PrefixDoubling => rank_by_doubling(block),
            RankingStrategy::Comparison => rank_by_comparison(block),
        };
        verify_permutation(&order)?;

        Ok(Self { order })
    }

    /// Number of rotations (the block length).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: an empty block is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Starting offset of the `i`th smallest rotation.
    pub fn index(&self, i: usize) -> Result<usize> {
        self.order.get(i).copied().ok_or_else(|| {
            OxiBwtError::invalid_input(format!(
                "rank {i} out of range for {} rotations",
                self.order.len()
            ))
        })
    }

    /// The full order, smallest rotation first.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Sorted position of the rotation starting at `rotation`.
    pub fn position_of(&self, rotation: usize) -> Result<usize> {
        if rotation >= self.order.len() {
            return Err(OxiBwtError::invalid_input(format!(
                "rotation {rotation} out of range for {} rotations",
                self.order.len()
            )));
        }
        self.order
            .iter()
            .position(|&r| r == rotation)
            .ok_or_else(|| OxiBwtError::invariant(format!("rotation {rotation} missing")))
    }
}

/// Reject blocks the transforms cannot handle.
pub(crate) fn validate_block(block: &[u8]) -> Result<()> {
    if block.is_empty() {
        return Err(OxiBwtError::invalid_input("block is empty"));
    }
    if block.len() > MAX_BLOCK_LEN {
        return Err(OxiBwtError::invalid_input(format!(
            "block of {} bytes exceeds the {MAX_BLOCK_LEN} byte limit",
            block.len()
        )));
    }
    Ok(())
}

/// Compare two rotations over the full block length.
fn compare_rotations(block: &[u8], a: usize, b: usize) -> Ordering {
    let n = block.len();
    let (mut pa, mut pb) = (a, b);
    for _ in 0..n {
        match block[pa].cmp(&block[pb]) {
            Ordering::Equal => {}
            other => return other,
        }
        pa += 1;
        if pa == n {
            pa = 0;
        }
        pb += 1;
        if pb == n {
            pb = 0;
        }
    }
    Ordering::Equal
}

fn rank_by_comparison(block: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..block.len()).collect();
    order.sort_unstable_by(|&a, &b| compare_rotations(block, a, b).then(a.cmp(&b)));
    debug!("ranked {} rotations by comparison", block.len());
    order
}

/// Prefix doubling over circular rotations.
///
/// After the round with step `k`, `rank[i]` is the class of the first `2k`
/// bytes of rotation `i`. Once `2k >= n` the class is the whole rotation, so
/// equal ranks mean equal rotations and the offset in the sort key settles
/// the tie.
fn rank_by_doubling(block: &[u8]) -> Vec<usize> {
    let n = block.len();
    let mut order: Vec<usize> = (0..n).collect();
    if n == 1 {
        return order;
    }

    let mut rank: Vec<usize> = block.iter().map(|&b| b as usize).collect();
    let mut next_rank = vec![0usize; n];
    let mut k = 1;
    let mut rounds = 0;

    loop {
        let r = &rank;
        order.sort_unstable_by_key(|&i| (r[i], r[(i + k) % n], i));

        next_rank[order[0]] = 0;
        for w in 1..n {
            let prev = order[w - 1];
            let cur = order[w];
            let same = r[prev] == r[cur] && r[(prev + k) % n] == r[(cur + k) % n];
            next_rank[cur] = next_rank[prev] + usize::from(!same);
        }
        std::mem::swap(&mut rank, &mut next_rank);
        rounds += 1;

        let classes = rank[order[n - 1]] + 1;
        trace!("doubling round {rounds}: prefix {}, {classes} classes", 2 * k);
        if classes == n || 2 * k >= n {
            break;
        }
        k *= 2;
    }

    debug!("ranked {n} rotations in {rounds} doubling rounds");
    order
}

/// Check that `order` is a permutation of `0..order.len()`.
fn verify_permutation(order: &[usize]) -> Result<()> {
    let n = order.len();
    let mut seen = vec![false; n];
    for (pos, &rot) in order.iter().enumerate() {
        if rot >= n {
            return Err(OxiBwtError::invariant(format!(
                "suffix order entry {pos} is {rot}, outside 0..{n}"
            )));
        }
        if seen[rot] {
            return Err(OxiBwtError::invariant(format!(
                "rotation {rot} appears twice in suffix order"
            )));
        }
        seen[rot] = true;
    }
    Ok(())
}
