//! huffman/mod.rs
//! Huffman codec: frequency analysis, minimum-merge tree, code table,
//! MSB-first bit packing and the zip container that carries the result.
//!
//! Pipeline: `FrequencyTable -> HuffmanTree -> CodeTable -> PackedBitstream -> Container`.
//! Decoding goes `Container -> DecodeTable + PackedBitstream -> bytes`.

pub mod bits;
pub mod code_table;
pub mod codec;
pub mod container;
pub mod frequency;
pub mod tree;

pub use bits::{pack, unpack, BitWriter, PackedBitstream};
pub use code_table::{Code, CodeTable, DecodeTable};
pub use codec::HuffmanCodec;
pub use container::{Container, ContainerSummary};
pub use frequency::FrequencyTable;
pub use tree::{HuffNode, HuffmanTree};
