//! compression/codecs/mod.rs
//! Codecs other than Huffman. The Huffman codec lives in `crate::huffman`.

pub mod external;

pub use external::*;
