//! huffman/container.rs
//! Self-describing archive: code table + padded payload in one zip file.
//!
//! Layout:
//! - `code_map.txt`: one `<decimal byte>:<binary code>` line per symbol,
//!   ascending symbol order, `\n` terminated.
//! - `compressed_data.bin`: `[padding length][packed bytes]`, MSB-first.
//!
//! Entries are deflated and stamped with the zip epoch (1980-01-01) so the
//! same input always produces the same archive bytes.

use std::fmt::Write as _;
use std::io::{Cursor, Read, Seek, Write};

use serde::Serialize;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::compression::CompressionError;
use crate::constants::{CODE_MAP_ENTRY, DATA_ENTRY, MAX_PADDING};
use crate::huffman::bits::PackedBitstream;
use crate::huffman::code_table::{Code, CodeTable};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub table: CodeTable,
    pub stream: PackedBitstream,
}

/// Shape of a parsed container, for inspection output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSummary {
    pub symbols: usize,
    pub max_code_len: u8,
    pub padding: u8,
    pub packed_bytes: usize,
    pub payload_bits: usize,
}

impl Container {
    /// Container for zero-byte input: no table lines, data entry `[0]`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn render_code_map(&self) -> String {
        let mut text = String::with_capacity(self.table.len() * 8);
        for (symbol, code) in self.table.iter() {
            // Writing into a String cannot fail.
            let _ = writeln!(text, "{}:{}", symbol, code);
        }
        text
    }

    pub fn data_entry(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.stream.bytes.len() + 1);
        data.push(self.stream.padding);
        data.extend_from_slice(&self.stream.bytes);
        data
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CompressionError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        writer.start_file(CODE_MAP_ENTRY, options).map_err(CompressionError::Archive)?;
        writer
            .write_all(self.render_code_map().as_bytes())
            .map_err(|e| CompressionError::Archive(e.into()))?;

        writer.start_file(DATA_ENTRY, options).map_err(CompressionError::Archive)?;
        writer
            .write_all(&self.data_entry())
            .map_err(|e| CompressionError::Archive(e.into()))?;

        let bytes = writer.finish().map_err(CompressionError::Archive)?.into_inner();
        debug!(symbols = self.table.len(), archive_bytes = bytes.len(), "encoded container");
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CompressionError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| CompressionError::malformed(format!("not a readable archive: {}", e)))?;

        let code_map = read_entry(&mut archive, CODE_MAP_ENTRY)?;
        let data = read_entry(&mut archive, DATA_ENTRY)?;

        let table = parse_code_map(&code_map)?;
        let stream = parse_data_entry(&data)?;

        debug!(symbols = table.len(), padding = stream.padding, "decoded container");
        Ok(Container { table, stream })
    }

    pub fn summary(&self) -> ContainerSummary {
        ContainerSummary {
            symbols: self.table.len(),
            max_code_len: self.table.max_len(),
            padding: self.stream.padding,
            packed_bytes: self.stream.bytes.len(),
            payload_bits: self.stream.bit_len(),
        }
    }
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>, CompressionError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| CompressionError::malformed(format!("missing entry '{}': {}", name, e)))?;

    let mut buf = Vec::new();
    entry
        .read_to_end(&mut buf)
        .map_err(|e| CompressionError::malformed(format!("unreadable entry '{}': {}", name, e)))?;
    Ok(buf)
}

/// Parse `<byte>:<code>` lines. Blank lines are skipped; duplicate symbols and
/// tables that are not prefix-free are rejected.
pub fn parse_code_map(raw: &[u8]) -> Result<CodeTable, CompressionError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| CompressionError::malformed(format!("code map is not UTF-8: {}", e)))?;

    let mut table = CodeTable::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let bad_line = |why: String| {
            CompressionError::malformed(format!("code map line {} ({:?}): {}", idx + 1, line, why))
        };

        let (symbol, code) = line
            .split_once(':')
            .ok_or_else(|| bad_line("expected <byte>:<code>".into()))?;
        let symbol = symbol.trim();
        if symbol.is_empty() || !symbol.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad_line("byte value must be decimal digits".into()));
        }
        let symbol: u8 = symbol
            .parse()
            .map_err(|e| bad_line(format!("invalid byte value: {}", e)))?;
        let code: Code = code.trim().parse().map_err(|e: CompressionError| bad_line(e.to_string()))?;

        if table.insert(symbol, code).is_some() {
            return Err(bad_line(format!("symbol {} listed twice", symbol)));
        }
    }

    if !table.is_prefix_free() {
        return Err(CompressionError::malformed("code map is not prefix-free"));
    }
    Ok(table)
}

pub fn parse_data_entry(data: &[u8]) -> Result<PackedBitstream, CompressionError> {
    let (&padding, bytes) = data
        .split_first()
        .ok_or_else(|| CompressionError::malformed("data entry is empty"))?;

    if padding > MAX_PADDING {
        return Err(CompressionError::malformed(format!(
            "padding length {} outside 0..={}", padding, MAX_PADDING
        )));
    }
    if padding > 0 && bytes.is_empty() {
        return Err(CompressionError::malformed(format!(
            "padding length {} with no packed bytes", padding
        )));
    }

    Ok(PackedBitstream { bytes: bytes.to_vec(), padding })
}
