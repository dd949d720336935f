//! huffman/tree.rs
//! Prefix-code tree built by repeatedly merging the two lightest nodes.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use crate::compression::CompressionError;
use crate::huffman::frequency::FrequencyTable;

/// Node of the prefix-code tree. Each node is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        byte: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
    /// Zero-weight placeholder sibling that gives a lone symbol a one-bit code.
    /// It carries no symbol and never receives a code.
    Sentinel,
}

impl HuffNode {
    pub fn leaf(byte: u8, weight: u64) -> Self {
        HuffNode::Leaf { byte, weight }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
            HuffNode::Sentinel => 0,
        }
    }

    /// `a` becomes the left (0) child, `b` the right (1) child.
    pub fn merge(a: Self, b: Self) -> Self {
        HuffNode::Internal {
            weight: a.weight() + b.weight(),
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    /// Longest root-to-leaf path below this node.
    pub fn depth(&self) -> usize {
        match self {
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
            _ => 0,
        }
    }
}

/// Heap entry ordered by (weight, sequence). Sequence numbers make ties
/// resolve the same way on every run.
#[derive(Debug)]
struct Queued {
    weight: u64,
    seq: u32,
    node: HuffNode,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Greedy minimum-merge construction.
    ///
    /// Leaves are queued in ascending symbol order and numbered 0..n; each
    /// merged node takes the next number. The lighter node (lower number on
    /// equal weight) goes left. A table with a single symbol gets a
    /// [`HuffNode::Sentinel`] right sibling so the symbol's code is `0`.
    pub fn build(freqs: &FrequencyTable) -> Result<Self, CompressionError> {
        if freqs.is_empty() {
            return Err(CompressionError::EmptyInput);
        }

        if freqs.len() == 1 {
            let (byte, weight) = freqs.iter().next().ok_or(CompressionError::EmptyInput)?;
            debug!(symbol = byte, "single-symbol input, adding sentinel sibling");
            let root = HuffNode::merge(HuffNode::leaf(byte, weight), HuffNode::Sentinel);
            return Ok(HuffmanTree { root });
        }

        let mut heap = BinaryHeap::with_capacity(freqs.len());
        let mut seq = 0u32;
        for (byte, weight) in freqs.iter() {
            heap.push(Reverse(Queued { weight, seq, node: HuffNode::leaf(byte, weight) }));
            seq += 1;
        }

        loop {
            let Reverse(first) = heap.pop().ok_or(CompressionError::EmptyInput)?;
            let Some(Reverse(second)) = heap.pop() else {
                let tree = HuffmanTree { root: first.node };
                debug!(symbols = freqs.len(), depth = tree.depth(), "built code tree");
                return Ok(tree);
            };

            let node = HuffNode::merge(first.node, second.node);
            heap.push(Reverse(Queued { weight: node.weight(), seq, node }));
            seq += 1;
        }
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }
}
