//! huffpack
//!
//! Command-line front end: picks an algorithm by name and moves bytes
//! between files. All codec work happens in `huffpack-core`.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use huffpack_core::compression::{algorithm_names, Codec, ExternalTool, ExternalToolCodec, Registry};
use huffpack_core::telemetry::{Operation, TelemetrySnapshot};
use huffpack_core::utils::{parse_file_size, write_random_text_file, FileDetails};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;

use args::{collect_options, Args, Command};

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let log_filter = format!("huffpack={level},huffpack_core={level}");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Standard registry with tool programs overridden from flags or env.
fn build_registry(args: &Args) -> Registry {
    let mut builder = Registry::builder().register(algorithm_names::HUFFMAN, Codec::huffman());

    let mut seven_zip = ExternalToolCodec::new(ExternalTool::SevenZip);
    if let Some(bin) = &args.seven_zip_bin {
        seven_zip = seven_zip.with_program(bin);
    }
    builder = builder.register(ExternalTool::SevenZip.name(), Codec::ExternalTool(seven_zip));

    let mut paq = ExternalToolCodec::new(ExternalTool::Paq);
    if let Some(bin) = &args.paq_bin {
        paq = paq.with_program(bin);
    }
    builder.register(ExternalTool::Paq.name(), Codec::ExternalTool(paq)).build()
}

fn run(args: Args) -> Result<()> {
    let registry = build_registry(&args);
    let json = args.json;

    match args.command {
        Command::Compress { algorithm, input, output, options } => {
            let codec = registry.select(&algorithm)?;
            let options = collect_options(options);
            let started = Instant::now();
            codec
                .compress(&input, &output, &options)
                .with_context(|| format!("{} failed to compress {}", algorithm, input.display()))?;

            let written = codec.output_path(&output);
            let snapshot =
                TelemetrySnapshot::from_paths(&algorithm, Operation::Compress, &input, &written, started)?;
            report(&snapshot, json)?;
        }
        Command::Decompress { algorithm, input, output } => {
            let codec = registry.select(&algorithm)?;
            let started = Instant::now();
            codec
                .decompress(&input, &output)
                .with_context(|| format!("{} failed to decompress {}", algorithm, input.display()))?;

            let snapshot =
                TelemetrySnapshot::from_paths(&algorithm, Operation::Decompress, &input, &output, started)?;
            report(&snapshot, json)?;
        }
        Command::Inspect { path } => {
            let details = FileDetails::from_path(&path)?;
            if json {
                print_json(&details)?;
            } else {
                print_details(&details);
            }
        }
        Command::Generate { size, output } => {
            let bytes = parse_file_size(&size).with_context(|| format!("invalid --size {:?}", size))?;
            let bytes = usize::try_from(bytes).context("size does not fit in memory on this platform")?;
            write_random_text_file(&output, bytes)?;
            info!(path = %output.display(), bytes, "generated random text");
            if json {
                print_json(&FileDetails::from_path(&output)?)?;
            } else {
                println!("wrote {} bytes to {}", bytes, output.display());
            }
        }
        Command::Algorithms => {
            let names: Vec<&str> = registry.names().collect();
            if json {
                print_json(&names)?;
            } else {
                for name in names {
                    let codec = registry.select(name)?;
                    let mode = if codec.supports_decompress() { "compress, decompress" } else { "compress" };
                    println!("{:<10} {}", name, mode);
                }
            }
        }
    }
    Ok(())
}

fn report(snapshot: &TelemetrySnapshot, json: bool) -> Result<()> {
    if json {
        print_json(snapshot)
    } else {
        println!("{}", snapshot);
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("failed to serialize output")?);
    Ok(())
}

fn print_details(details: &FileDetails) {
    println!("name:   {}", details.name);
    println!("size:   {} bytes", details.size);
    match &details.container {
        Some(c) => {
            println!("huffman container:");
            println!("  symbols:       {}", c.symbols);
            println!("  max code len:  {}", c.max_code_len);
            println!("  padding bits:  {}", c.padding);
            println!("  packed bytes:  {}", c.packed_bytes);
            println!("  payload bits:  {}", c.payload_bits);
        }
        None => println!("not a huffman container"),
    }
}
