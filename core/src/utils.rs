//! utils.rs
//! Size parsing, random text generation and file inspection helpers.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::compression::CompressionError;
use crate::constants::RANDOM_TEXT_ALPHABET;
use crate::huffman::{Container, ContainerSummary};
use crate::io::write_output_atomic;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeParseError {
    #[error("size is empty")]
    Empty,
    #[error("invalid size number in {0:?}")]
    InvalidNumber(String),
    #[error("unknown size unit {0:?} (expected B, KB, MB or GB)")]
    UnknownUnit(String),
    #[error("size {0:?} is too large")]
    Overflow(String),
}

/// Parse sizes like `512`, `10KB`, `4 mb`, `1G`. Units are binary multiples.
pub fn parse_file_size(raw: &str) -> Result<u64, SizeParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(SizeParseError::Empty);
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let value: u64 = number
        .parse()
        .map_err(|_| SizeParseError::InvalidNumber(raw.to_string()))?;

    let multiplier: u64 = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B"    => 1,
        "K" | "KB"  => 1 << 10,
        "M" | "MB"  => 1 << 20,
        "G" | "GB"  => 1 << 30,
        other => return Err(SizeParseError::UnknownUnit(other.to_string())),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| SizeParseError::Overflow(raw.to_string()))
}

/// `size` bytes drawn uniformly from letters, digits, space, `.`, `,` and newline.
pub fn generate_random_text<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<u8> {
    (0..size)
        .map(|_| RANDOM_TEXT_ALPHABET[rng.gen_range(0..RANDOM_TEXT_ALPHABET.len())])
        .collect()
}

/// Write a random text file of `size` bytes to `path`.
pub fn write_random_text_file(path: &Path, size: usize) -> Result<(), CompressionError> {
    let content = generate_random_text(size, &mut rand::thread_rng());
    write_output_atomic(path, &content)?;
    debug!(path = %path.display(), size, "generated random text file");
    Ok(())
}

/// Name and size of a file, plus the container layout when it parses as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDetails {
    pub name: String,
    pub size: u64,
    pub container: Option<ContainerSummary>,
}

impl FileDetails {
    pub fn from_path(path: &Path) -> Result<Self, CompressionError> {
        let meta = fs::metadata(path).map_err(|e| CompressionError::io("file not found", path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let container = if meta.is_file() {
            let bytes = fs::read(path).map_err(|e| CompressionError::io("failed to read file", path, e))?;
            Container::from_bytes(&bytes).ok().map(|c| c.summary())
        } else {
            None
        };

        Ok(FileDetails { name, size: meta.len(), container })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_plain_and_unit_sizes() {
        assert_eq!(parse_file_size("512"), Ok(512));
        assert_eq!(parse_file_size("0"), Ok(0));
        assert_eq!(parse_file_size("10KB"), Ok(10 * 1024));
        assert_eq!(parse_file_size("4 mb"), Ok(4 * 1024 * 1024));
        assert_eq!(parse_file_size("1G"), Ok(1 << 30));
        assert_eq!(parse_file_size(" 7b "), Ok(7));
    }

    #[test]
    fn rejects_bad_sizes() {
        assert_eq!(parse_file_size(""), Err(SizeParseError::Empty));
        assert!(matches!(parse_file_size("-5"), Err(SizeParseError::InvalidNumber(_))));
        assert!(matches!(parse_file_size("KB"), Err(SizeParseError::InvalidNumber(_))));
        assert!(matches!(parse_file_size("10TB"), Err(SizeParseError::UnknownUnit(_))));
        assert!(matches!(
            parse_file_size("99999999999999999999GB"),
            Err(SizeParseError::InvalidNumber(_))
        ));
        assert!(matches!(parse_file_size("18446744073709551615GB"), Err(SizeParseError::Overflow(_))));
    }

    #[test]
    fn random_text_uses_alphabet_and_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let text = generate_random_text(4096, &mut rng);
        assert_eq!(text.len(), 4096);
        assert!(text.iter().all(|b| RANDOM_TEXT_ALPHABET.contains(b)));
    }

    #[test]
    fn random_text_is_reproducible_with_a_seed() {
        let a = generate_random_text(256, &mut StdRng::seed_from_u64(1));
        let b = generate_random_text(256, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn writes_random_file_of_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("random.txt");
        write_random_text_file(&path, 1000).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 1000);
    }

    #[test]
    fn details_of_plain_file_have_no_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, b"hello").unwrap();

        let details = FileDetails::from_path(&path).unwrap();
        assert_eq!(details.name, "plain.txt");
        assert_eq!(details.size, 5);
        assert!(details.container.is_none());
    }

    #[test]
    fn details_of_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileDetails::from_path(&dir.path().join("gone")),
            Err(CompressionError::Io { .. })
        ));
    }
}
