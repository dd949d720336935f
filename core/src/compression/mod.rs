//! compression/mod.rs
//! Algorithm registry and the codecs it dispatches to.
//!
//! Notes:
//! - Codecs form a closed set (`Codec`), selected by name through `Registry`.
//! - Each call reads its whole input, runs to completion and writes one artifact.
//! - Only the Huffman codec guarantees a round trip; external tools compress only.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use codecs::*;
