//! huffpack-core
//!
//! Pluggable compression framework: a name-keyed registry of codecs behind a
//! uniform `compress(input, output, options)` contract, with a self-contained
//! Huffman codec as the one round-trip-safe algorithm.
//!
//! ```no_run
//! use std::path::Path;
//! use huffpack_core::compression::{CompressOptions, Registry};
//!
//! let registry = Registry::standard();
//! let codec = registry.select("huffman")?;
//! codec.compress(Path::new("input.txt"), Path::new("input.huff"), &CompressOptions::new())?;
//! codec.decompress(Path::new("input.huff"), Path::new("roundtrip.txt"))?;
//! # Ok::<(), huffpack_core::compression::CompressionError>(())
//! ```

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod io;
pub mod utils;

pub mod compression;
pub mod huffman;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{Codec, CompressOptions, CompressionError, Registry};
    pub use crate::huffman::{Container, HuffmanCodec};
    pub use crate::telemetry::{Operation, TelemetrySnapshot};
}
