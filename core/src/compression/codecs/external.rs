//! codecs/external.rs
//! Pass-through codecs that shell out to installed archivers.
//!
//! These only define a compression direction. Round-trip guarantees belong
//! to the Huffman codec alone.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::compression::constants::{
    algorithm_names, default_programs, MAX_LEVEL, MIN_LEVEL, OPTION_LEVEL, PAQ_EXTENSION,
};
use crate::compression::types::{CompressOptions, CompressionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTool {
    SevenZip,
    Paq,
}

impl ExternalTool {
    pub fn name(&self) -> &'static str {
        match self {
            ExternalTool::SevenZip => algorithm_names::SEVEN_ZIP,
            ExternalTool::Paq      => algorithm_names::PAQ,
        }
    }

    pub fn default_program(&self) -> &'static str {
        match self {
            ExternalTool::SevenZip => default_programs::SEVEN_ZIP,
            ExternalTool::Paq      => default_programs::PAQ,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalToolCodec {
    tool: ExternalTool,
    program: PathBuf,
}

impl ExternalToolCodec {
    pub fn new(tool: ExternalTool) -> Self {
        ExternalToolCodec { tool, program: PathBuf::from(tool.default_program()) }
    }

    /// Use a specific executable instead of the one found on `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn tool(&self) -> ExternalTool {
        self.tool
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Where the tool will actually leave its output. PAQ insists on a `.paq`
    /// extension and gets one appended when missing.
    pub fn resolve_output(&self, output: &Path) -> PathBuf {
        match self.tool {
            ExternalTool::Paq if output.extension().map_or(true, |e| e != PAQ_EXTENSION) => {
                let mut name = output.as_os_str().to_owned();
                name.push(".");
                name.push(PAQ_EXTENSION);
                PathBuf::from(name)
            }
            _ => output.to_path_buf(),
        }
    }

    /// Command-line arguments for one compression run.
    pub fn args(&self, input: &Path, output: &Path, options: &CompressOptions) -> Vec<OsString> {
        match self.tool {
            ExternalTool::SevenZip => {
                let mut args: Vec<OsString> = vec!["a".into(), "-y".into()];
                if let Some(level) = level_option(options) {
                    args.push(format!("-mx={}", level).into());
                }
                args.push(output.into());
                args.push(input.into());
                args
            }
            ExternalTool::Paq => vec![input.into(), self.resolve_output(output).into()],
        }
    }

    pub fn compress(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressOptions,
    ) -> Result<(), CompressionError> {
        let target = self.resolve_output(output);
        let args = self.args(input, output, options);
        info!(
            tool = self.tool.name(),
            program = %self.program.display(),
            input = %input.display(),
            output = %target.display(),
            "external compress"
        );
        debug!(?args, "spawning external tool");

        let result = Command::new(&self.program).args(&args).output().map_err(|e| {
            warn!(tool = self.tool.name(), error = %e, "failed to spawn external tool");
            CompressionError::ToolFailed {
                tool: self.tool.name().to_string(),
                status: "spawn error".to_string(),
                output: e.to_string(),
            }
        })?;

        if !result.status.success() {
            let mut output = String::from_utf8_lossy(&result.stdout).into_owned();
            output.push_str(&String::from_utf8_lossy(&result.stderr));
            warn!(tool = self.tool.name(), status = %result.status, "external tool failed");
            return Err(CompressionError::ToolFailed {
                tool: self.tool.name().to_string(),
                status: result.status.to_string(),
                output: output.trim().to_string(),
            });
        }

        if !target.exists() {
            return Err(CompressionError::ToolOutputMissing {
                tool: self.tool.name().to_string(),
                path: target,
            });
        }
        Ok(())
    }

    pub fn decompress(&self, _input: &Path, _output: &Path) -> Result<(), CompressionError> {
        Err(CompressionError::DecompressUnsupported { algorithm: self.tool.name().to_string() })
    }
}

/// `level` in 0..=9, or `None` when absent or unusable.
fn level_option(options: &CompressOptions) -> Option<i64> {
    options.get(OPTION_LEVEL)?;
    match options.get_i64(OPTION_LEVEL) {
        Some(level) if (MIN_LEVEL..=MAX_LEVEL).contains(&level) => Some(level),
        _ => {
            warn!(value = ?options.get(OPTION_LEVEL), "ignoring invalid compression level");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn seven_zip_arguments() {
        let codec = ExternalToolCodec::new(ExternalTool::SevenZip);
        let args = codec.args(Path::new("in.txt"), Path::new("out.7z"), &CompressOptions::new());
        assert_eq!(strings(args), vec!["a", "-y", "out.7z", "in.txt"]);
    }

    #[test]
    fn seven_zip_forwards_valid_level_only() {
        let codec = ExternalToolCodec::new(ExternalTool::SevenZip);
        let opts = CompressOptions::new().with("level", 9);
        let args = codec.args(Path::new("in"), Path::new("out"), &opts);
        assert_eq!(strings(args), vec!["a", "-y", "-mx=9", "out", "in"]);

        let opts = CompressOptions::new().with("level", 42);
        let args = codec.args(Path::new("in"), Path::new("out"), &opts);
        assert_eq!(strings(args), vec!["a", "-y", "out", "in"]);
    }

    #[test]
    fn paq_appends_extension_once() {
        let codec = ExternalToolCodec::new(ExternalTool::Paq);
        assert_eq!(codec.resolve_output(Path::new("out")), PathBuf::from("out.paq"));
        assert_eq!(codec.resolve_output(Path::new("out.bin")), PathBuf::from("out.bin.paq"));
        assert_eq!(codec.resolve_output(Path::new("out.paq")), PathBuf::from("out.paq"));

        let opts = CompressOptions::new().with("level", 3);
        let args = codec.args(Path::new("in"), Path::new("out"), &opts);
        assert_eq!(strings(args), vec!["in", "out.paq"]);
    }

    #[test]
    fn default_programs_and_override() {
        assert_eq!(ExternalToolCodec::new(ExternalTool::SevenZip).program(), Path::new("7z"));
        let codec = ExternalToolCodec::new(ExternalTool::Paq).with_program("/opt/paq/paq8pf");
        assert_eq!(codec.program(), Path::new("/opt/paq/paq8pf"));
    }

    #[test]
    fn missing_program_is_tool_failure() {
        let codec = ExternalToolCodec::new(ExternalTool::SevenZip)
            .with_program("/nonexistent/huffpack-test-7z");
        let err = codec
            .compress(Path::new("in"), Path::new("out"), &CompressOptions::new())
            .unwrap_err();
        assert!(matches!(err, CompressionError::ToolFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_is_tool_failure() {
        let codec = ExternalToolCodec::new(ExternalTool::SevenZip).with_program("false");
        let err = codec
            .compress(Path::new("in"), Path::new("out"), &CompressOptions::new())
            .unwrap_err();
        assert!(matches!(err, CompressionError::ToolFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn success_without_output_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("never-written");
        let codec = ExternalToolCodec::new(ExternalTool::Paq).with_program("true");
        match codec.compress(Path::new("in"), &output, &CompressOptions::new()) {
            Err(CompressionError::ToolOutputMissing { path, .. }) => {
                assert_eq!(path, codec.resolve_output(&output));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn decompress_is_unsupported() {
        let codec = ExternalToolCodec::new(ExternalTool::Paq);
        assert!(matches!(
            codec.decompress(Path::new("a"), Path::new("b")),
            Err(CompressionError::DecompressUnsupported { .. })
        ));
    }
}
