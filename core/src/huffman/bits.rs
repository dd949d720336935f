//! huffman/bits.rs
//! MSB-first bit packing of codewords and the greedy unpacker.

use tracing::debug;

use crate::compression::CompressionError;
use crate::constants::{MAX_PADDING, SYMBOL_COUNT};
use crate::huffman::code_table::{Code, CodeTable, DecodeTable};

/// Packed codewords plus the count of zero bits appended to the last byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBitstream {
    pub bytes: Vec<u8>,
    pub padding: u8,
}

impl PackedBitstream {
    /// Meaningful bits, excluding padding. Saturates on out-of-range padding.
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding as usize)
    }
}

/// MSB-first bit accumulator.
#[derive(Default, Debug)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        BitWriter { bytes: Vec::with_capacity(bytes), bit_count: 0 }
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }

    pub fn push_code(&mut self, code: Code) {
        for pos in (0..code.len()).rev() {
            self.push_bit((code.bits() >> pos) & 1 == 1);
        }
    }

    /// Zero bits needed to reach the next byte boundary (0..=7).
    pub fn padding(&self) -> u8 {
        ((8 - self.bit_count % 8) % 8) as u8
    }

    /// Unwritten trailing bits are already zero, so this only records the count.
    pub fn finish(self) -> PackedBitstream {
        let padding = self.padding();
        PackedBitstream { bytes: self.bytes, padding }
    }
}

/// Concatenate each byte's code in input order and pad to a byte boundary.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<PackedBitstream, CompressionError> {
    let mut lookup: [Option<Code>; SYMBOL_COUNT] = [None; SYMBOL_COUNT];
    for (symbol, code) in table.iter() {
        lookup[symbol as usize] = Some(code);
    }

    let mut writer = BitWriter::with_capacity(data.len());
    for &byte in data {
        let code = lookup[byte as usize].ok_or(CompressionError::MissingCode { symbol: byte })?;
        writer.push_code(code);
    }

    let bits = writer.bit_count();
    let stream = writer.finish();
    debug!(bits, padding = stream.padding, bytes = stream.bytes.len(), "packed bitstream");
    Ok(stream)
}

/// Strip padding and greedily match codewords against the decode table.
pub fn unpack(stream: &PackedBitstream, table: &DecodeTable) -> Result<Vec<u8>, CompressionError> {
    if stream.padding > MAX_PADDING {
        return Err(CompressionError::malformed(format!(
            "padding length {} outside 0..={}", stream.padding, MAX_PADDING
        )));
    }
    let total_bits = stream.bytes.len() * 8;
    if stream.padding as usize > total_bits {
        return Err(CompressionError::malformed(format!(
            "padding length {} exceeds {} payload bits", stream.padding, total_bits
        )));
    }

    let payload_bits = total_bits - stream.padding as usize;
    if payload_bits > 0 && table.is_empty() {
        return Err(CompressionError::decoding("payload present but code table is empty"));
    }

    let mut out = Vec::with_capacity(payload_bits / table.max_len().max(1) as usize);
    let mut current = Code::EMPTY;
    for i in 0..payload_bits {
        let bit = (stream.bytes[i / 8] >> (7 - i % 8)) & 1 == 1;
        current = current
            .push(bit)
            .ok_or_else(|| CompressionError::decoding(format!("code overflow at bit {}", i)))?;

        if let Some(symbol) = table.lookup(&current) {
            out.push(symbol);
            current = Code::EMPTY;
        } else if current.len() >= table.max_len() {
            return Err(CompressionError::decoding(format!(
                "bits {} ending at offset {} match no code", current, i
            )));
        }
    }

    if !current.is_empty() {
        return Err(CompressionError::decoding(format!(
            "bitstream ended inside a code ({} dangling bits)", current.len()
        )));
    }

    debug!(bits = payload_bits, symbols = out.len(), "unpacked bitstream");
    Ok(out)
}
