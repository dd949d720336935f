//! io.rs
//! Whole-file input and all-or-nothing output.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::compression::CompressionError;

/// Read the whole input file into memory.
pub fn read_input(path: &Path) -> Result<Vec<u8>, CompressionError> {
    let data = fs::read(path).map_err(|e| CompressionError::io("failed to read input file", path, e))?;
    debug!(path = %path.display(), bytes = data.len(), "read input");
    Ok(data)
}

/// Write `bytes` to `path` through a temp file in the same directory, renamed
/// into place only after every byte landed. On failure the temp file is
/// removed and `path` is left untouched.
pub fn write_output_atomic(path: &Path, bytes: &[u8]) -> Result<(), CompressionError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = output_temp_file(dir)
        .map_err(|e| CompressionError::io("failed to create output file", path, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.flush())
        .map_err(|e| CompressionError::io("failed to write output file", path, e))?;
    tmp.persist(path)
        .map_err(|e| CompressionError::io("failed to finalize output file", path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}

/// Temp files default to owner-only; outputs get the usual file mode instead.
#[cfg_attr(not(unix), allow(unused_mut))]
fn output_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(crate::constants::OUTPUT_FILE_MODE));
    }
    builder.tempfile_in(dir)
}
