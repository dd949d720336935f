//! telemetry/snapshot.rs
//! Immutable summary of one compress or decompress call.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::compression::CompressionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Compress,
    Decompress,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Compress   => "compress",
            Operation::Decompress => "decompress",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub algorithm: String,
    pub operation: Operation,
    pub bytes_input: u64,
    pub bytes_output: u64,
    /// compressed size / original size; 0.0 when the original is empty.
    pub compression_ratio: f64,
    pub throughput_input_bytes_per_sec: f64,
    pub elapsed: Duration,
}

impl TelemetrySnapshot {
    pub fn new(
        algorithm: impl Into<String>,
        operation: Operation,
        bytes_input: u64,
        bytes_output: u64,
        elapsed: Duration,
    ) -> Self {
        let (compressed, original) = match operation {
            Operation::Compress   => (bytes_output, bytes_input),
            Operation::Decompress => (bytes_input, bytes_output),
        };
        let compression_ratio = if original > 0 {
            compressed as f64 / original as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            bytes_input as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            algorithm: algorithm.into(),
            operation,
            bytes_input,
            bytes_output,
            compression_ratio,
            throughput_input_bytes_per_sec: throughput,
            elapsed,
        }
    }

    /// Snapshot from the sizes of the files a finished call read and wrote.
    pub fn from_paths(
        algorithm: impl Into<String>,
        operation: Operation,
        input: &Path,
        output: &Path,
        started: Instant,
    ) -> Result<Self, CompressionError> {
        let elapsed = started.elapsed();
        let bytes_input = file_len(input)?;
        let bytes_output = file_len(output)?;
        Ok(Self::new(algorithm, operation, bytes_input, bytes_output, elapsed))
    }

    /// Fraction of the original size saved; negative when the output grew.
    pub fn space_saving(&self) -> f64 {
        if self.compression_ratio == 0.0 {
            0.0
        } else {
            1.0 - self.compression_ratio
        }
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} -> {} bytes (ratio {:.3}) in {:.2?}",
            self.algorithm,
            self.operation,
            self.bytes_input,
            self.bytes_output,
            self.compression_ratio,
            self.elapsed
        )
    }
}

fn file_len(path: &Path) -> Result<u64, CompressionError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| CompressionError::io("failed to stat file", path, e))
}
