//! compression/types.rs
//! Error type and per-call options shared by every codec.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Terminal error for a compress/decompress call.
/// - Every stage returns the first failure it meets; nothing is retried.
/// - File-level failures carry the stage and path that produced them.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// Reading or writing a file failed.
    #[error("{context} '{}': {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The registry has no codec under this name.
    #[error("unsupported compression algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    /// The archive is structurally invalid (missing entry, bad table, bad padding).
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The payload bits do not resolve to symbols under the stored table.
    #[error("decoding failure: {0}")]
    DecodingFailure(String),

    /// The tree builder was handed an empty frequency table.
    #[error("cannot build a code tree from empty input")]
    EmptyInput,

    /// The packer met a byte the code table has no entry for.
    #[error("no code for byte {symbol}")]
    MissingCode { symbol: u8 },

    /// A generated code does not fit the fixed-width code representation.
    #[error("code length {len} exceeds the supported maximum")]
    CodeTooLong { len: usize },

    /// Writing the archive itself failed.
    #[error("archive write failed: {0}")]
    Archive(#[source] zip::result::ZipError),

    /// The selected algorithm only defines a compression direction.
    #[error("algorithm '{algorithm}' does not support decompression")]
    DecompressUnsupported { algorithm: String },

    /// An external tool exited unsuccessfully or could not be spawned.
    #[error("{tool} failed ({status}): {output}")]
    ToolFailed {
        tool: String,
        status: String,
        output: String,
    },

    /// An external tool reported success but left no output behind.
    #[error("{tool} finished without error, but output '{}' was not created", path.display())]
    ToolOutputMissing { tool: String, path: PathBuf },
}

impl CompressionError {
    pub fn io(context: &'static str, path: &Path, source: io::Error) -> Self {
        CompressionError::Io { context, path: path.to_path_buf(), source }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        CompressionError::MalformedContainer(msg.into())
    }

    pub fn decoding(msg: impl Into<String>) -> Self {
        CompressionError::DecodingFailure(msg.into())
    }
}

/// Open per-call configuration map.
///
/// Codecs read the keys they understand and ignore the rest. The Huffman codec
/// reads none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompressOptions {
    entries: BTreeMap<String, Value>,
}

impl CompressOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Integer view of a key. Numeric strings are accepted too since
    /// command-line options arrive as text.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.entries.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
