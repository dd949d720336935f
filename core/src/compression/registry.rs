//! compression/registry.rs
//! Name-keyed dispatch over the closed set of codecs.
//!
//! The registry is built explicitly at the call site; there is no
//! process-wide registration step.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::compression::codecs::{ExternalTool, ExternalToolCodec};
use crate::compression::constants::algorithm_names;
use crate::compression::types::{CompressOptions, CompressionError};
use crate::huffman::HuffmanCodec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codec {
    Huffman(HuffmanCodec),
    ExternalTool(ExternalToolCodec),
}

impl Codec {
    pub fn huffman() -> Self {
        Codec::Huffman(HuffmanCodec::new())
    }

    pub fn external(tool: ExternalTool) -> Self {
        Codec::ExternalTool(ExternalToolCodec::new(tool))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Codec::Huffman(_) => algorithm_names::HUFFMAN,
            Codec::ExternalTool(c) => c.tool().name(),
        }
    }

    pub fn supports_decompress(&self) -> bool {
        matches!(self, Codec::Huffman(_))
    }

    /// Path the artifact actually lands at for a requested `output`.
    pub fn output_path(&self, output: &Path) -> PathBuf {
        match self {
            Codec::Huffman(_) => output.to_path_buf(),
            Codec::ExternalTool(c) => c.resolve_output(output),
        }
    }

    pub fn compress(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressOptions,
    ) -> Result<(), CompressionError> {
        match self {
            Codec::Huffman(c) => c.compress(input, output, options),
            Codec::ExternalTool(c) => c.compress(input, output, options),
        }
    }

    pub fn decompress(&self, input: &Path, output: &Path) -> Result<(), CompressionError> {
        match self {
            Codec::Huffman(c) => c.decompress(input, output),
            Codec::ExternalTool(c) => c.decompress(input, output),
        }
    }
}

/// Ordered name -> codec table.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<(String, Codec)>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// `huffman`, `7zip`, `paq`, in that order, with default tool programs.
    pub fn standard() -> Self {
        Self::builder()
            .register(algorithm_names::HUFFMAN, Codec::huffman())
            .register(algorithm_names::SEVEN_ZIP, Codec::external(ExternalTool::SevenZip))
            .register(algorithm_names::PAQ, Codec::external(ExternalTool::Paq))
            .build()
    }

    pub fn select(&self, name: &str) -> Result<&Codec, CompressionError> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, codec)| codec)
            .ok_or_else(|| CompressionError::UnsupportedAlgorithm { name: name.to_string() })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select by name, then compress.
    pub fn compress(
        &self,
        algorithm: &str,
        input: &Path,
        output: &Path,
        options: &CompressOptions,
    ) -> Result<(), CompressionError> {
        self.select(algorithm)?.compress(input, output, options)
    }

    /// Select by name, then decompress.
    pub fn decompress(&self, algorithm: &str, input: &Path, output: &Path) -> Result<(), CompressionError> {
        self.select(algorithm)?.decompress(input, output)
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<(String, Codec)>,
}

impl RegistryBuilder {
    /// Registering an existing name replaces its codec in place.
    pub fn register(mut self, name: impl Into<String>, codec: Codec) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = codec,
            None => self.entries.push((name, codec)),
        }
        self
    }

    pub fn build(self) -> Registry {
        debug!(algorithms = self.entries.len(), "built codec registry");
        Registry { entries: self.entries }
    }
}
