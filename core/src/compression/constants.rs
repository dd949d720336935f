/// Stable registry keys. These are the names callers select algorithms by.
pub mod algorithm_names {
    pub const HUFFMAN: &str    = "huffman";
    pub const SEVEN_ZIP: &str  = "7zip";
    pub const PAQ: &str        = "paq";
}

/// Default executables looked up on `PATH` for the external-tool codecs.
pub mod default_programs {
    pub const SEVEN_ZIP: &str = "7z";
    pub const PAQ: &str       = "paq8pf";
}

/// Extension the PAQ tool expects on its output file.
pub const PAQ_EXTENSION: &str = "paq";

/// Option key carrying a compression level for tools that accept one.
pub const OPTION_LEVEL: &str = "level";

/// Accepted range for the `level` option (7-Zip `-mx`).
pub const MIN_LEVEL: i64 = 0;
pub const MAX_LEVEL: i64 = 9;
