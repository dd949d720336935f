/// Archive entry holding the `<byte>:<code>` table, one line per symbol.
pub const CODE_MAP_ENTRY: &str = "code_map.txt";

/// Archive entry holding `[padding][packed bytes]`.
pub const DATA_ENTRY: &str = "compressed_data.bin";

/// Longest code a table may carry. Codes are held MSB-first in a `u64`.
pub const MAX_CODE_LEN: u8 = 64;

/// Padding is the filler needed to reach a byte boundary, so it never reaches 8.
pub const MAX_PADDING: u8 = 7;

/// Mode requested for written files on unix, before the process umask.
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// Number of distinct symbols (one per byte value).
pub const SYMBOL_COUNT: usize = 256;

/// Characters drawn by the random text generator.
pub const RANDOM_TEXT_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,\n";
