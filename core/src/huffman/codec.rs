//! huffman/codec.rs
//! Byte-level and file-level entry points of the Huffman codec.

use std::path::Path;

use tracing::{debug, info};

use crate::compression::{CompressOptions, CompressionError};
use crate::huffman::bits::{pack, unpack};
use crate::huffman::code_table::CodeTable;
use crate::huffman::container::Container;
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::tree::HuffmanTree;
use crate::io::{read_input, write_output_atomic};

/// Stateless Huffman codec. Every call owns its own tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    pub fn new() -> Self {
        HuffmanCodec
    }

    /// Analyze, build, tabulate, pack. Empty input yields [`Container::empty`].
    pub fn encode(&self, data: &[u8]) -> Result<Container, CompressionError> {
        let freqs = FrequencyTable::from_bytes(data);
        if freqs.is_empty() {
            debug!("empty input, emitting empty container");
            return Ok(Container::empty());
        }
        debug!(bytes = data.len(), symbols = freqs.len(), "analyzed input");

        let tree = HuffmanTree::build(&freqs)?;
        let table = CodeTable::from_tree(&tree)?;
        let stream = pack(data, &table)?;

        Ok(Container { table, stream })
    }

    pub fn decode(&self, container: &Container) -> Result<Vec<u8>, CompressionError> {
        unpack(&container.stream, &container.table.inverse())
    }

    /// In-memory form of [`HuffmanCodec::compress`]: raw bytes to archive bytes.
    pub fn compress_bytes(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        self.encode(data)?.to_bytes()
    }

    pub fn decompress_bytes(&self, archive: &[u8]) -> Result<Vec<u8>, CompressionError> {
        self.decode(&Container::from_bytes(archive)?)
    }

    /// Compress `input` into a container at `output`.
    /// No options are recognised; every key is ignored.
    pub fn compress(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressOptions,
    ) -> Result<(), CompressionError> {
        info!(input = %input.display(), output = %output.display(), "huffman compress");
        if !options.is_empty() {
            debug!(ignored = options.len(), "huffman ignores all options");
        }

        let data = read_input(input)?;
        let archive = self.compress_bytes(&data)?;
        write_output_atomic(output, &archive)?;

        debug!(input_bytes = data.len(), output_bytes = archive.len(), "huffman compress done");
        Ok(())
    }

    pub fn decompress(&self, input: &Path, output: &Path) -> Result<(), CompressionError> {
        info!(input = %input.display(), output = %output.display(), "huffman decompress");

        let archive = read_input(input)?;
        let data = self.decompress_bytes(&archive)?;
        write_output_atomic(output, &data)?;

        debug!(input_bytes = archive.len(), output_bytes = data.len(), "huffman decompress done");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_roundtrip() {
        let codec = HuffmanCodec::new();
        let container = codec.encode(b"aaaabbbcc").unwrap();
        assert_eq!(container.table.get(b'a').unwrap().len(), 1);
        assert_eq!(container.table.get(b'c').unwrap().len(), 2);
        assert_eq!(codec.decode(&container).unwrap(), b"aaaabbbcc".to_vec());
    }

    #[test]
    fn empty_input_roundtrip() {
        let codec = HuffmanCodec::new();
        let archive = codec.compress_bytes(&[]).unwrap();
        let parsed = Container::from_bytes(&archive).unwrap();
        assert_eq!(parsed.data_entry(), vec![0]);
        assert!(codec.decompress_bytes(&archive).unwrap().is_empty());
    }

    #[test]
    fn single_repeated_byte_roundtrip() {
        let codec = HuffmanCodec::new();
        let data = vec![0x41u8; 1000];
        let container = codec.encode(&data).unwrap();
        assert_eq!(container.stream.bytes.len(), 125);
        assert_eq!(container.stream.padding, 0);
        assert_eq!(codec.decode(&container).unwrap(), data);
    }

    #[test]
    fn single_byte_input_roundtrip() {
        let codec = HuffmanCodec::new();
        let archive = codec.compress_bytes(&[0xFF]).unwrap();
        assert_eq!(codec.decompress_bytes(&archive).unwrap(), vec![0xFF]);
    }
}
