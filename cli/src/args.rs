//! args.rs
//! Command-line definition and `key=value` option parsing.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use huffpack_core::compression::{algorithm_names, CompressOptions};
use serde_json::Value;

/// Compress and decompress files with a named algorithm.
#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// 7-Zip executable used by the `7zip` algorithm
    #[arg(long, global = true, env = "HUFFPACK_7Z")]
    pub seven_zip_bin: Option<PathBuf>,

    /// PAQ executable used by the `paq` algorithm
    #[arg(long, global = true, env = "HUFFPACK_PAQ")]
    pub paq_bin: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress INPUT into OUTPUT
    Compress {
        #[arg(long, short = 'a', default_value = algorithm_names::HUFFMAN)]
        algorithm: String,

        input: PathBuf,
        output: PathBuf,

        /// Algorithm option as key=value; values parse as JSON, else as text
        #[arg(long = "option", short = 'o', value_name = "KEY=VALUE", value_parser = parse_option)]
        options: Vec<(String, Value)>,
    },

    /// Restore INPUT into OUTPUT
    Decompress {
        #[arg(long, short = 'a', default_value = algorithm_names::HUFFMAN)]
        algorithm: String,

        input: PathBuf,
        output: PathBuf,
    },

    /// Show size and container layout of a file
    Inspect { path: PathBuf },

    /// Write a random text file
    Generate {
        /// Size such as 512, 10KB or 4MB
        #[arg(long, short = 's')]
        size: String,

        output: PathBuf,
    },

    /// List registered algorithms
    Algorithms,
}

pub fn parse_option(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected KEY=VALUE, got {:?}", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("option key is empty in {:?}", raw);
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn collect_options(pairs: Vec<(String, Value)>) -> CompressOptions {
    let mut options = CompressOptions::new();
    for (key, value) in pairs {
        options.insert(key, value);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn clap_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn option_values_prefer_json() {
        assert_eq!(parse_option("level=9").unwrap(), ("level".to_string(), json!(9)));
        assert_eq!(parse_option("fast=true").unwrap(), ("fast".to_string(), json!(true)));
        assert_eq!(parse_option("mode=ultra").unwrap(), ("mode".to_string(), json!("ultra")));
        assert_eq!(parse_option("note=a=b").unwrap(), ("note".to_string(), json!("a=b")));
    }

    #[test]
    fn malformed_options_are_rejected() {
        assert!(parse_option("level").is_err());
        assert!(parse_option("=9").is_err());
    }

    #[test]
    fn later_options_override_earlier() {
        let options = collect_options(vec![
            ("level".to_string(), json!(1)),
            ("level".to_string(), json!(5)),
        ]);
        assert_eq!(options.get_i64("level"), Some(5));
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn parses_compress_invocation() {
        let args = Args::try_parse_from([
            "huffpack", "--json", "compress", "-a", "7zip", "in.txt", "out.7z", "-o", "level=3",
        ])
        .unwrap();
        assert!(args.json);
        match args.command {
            Command::Compress { algorithm, options, .. } => {
                assert_eq!(algorithm, "7zip");
                assert_eq!(options, vec![("level".to_string(), json!(3))]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn decompress_defaults_to_huffman() {
        let args = Args::try_parse_from(["huffpack", "decompress", "a.huff", "a.txt"]).unwrap();
        match args.command {
            Command::Decompress { algorithm, .. } => assert_eq!(algorithm, "huffman"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
