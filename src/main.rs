// src/main.rs
mod logger;

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use huffpack::CodecError;

const TEMP_EXT: &str = "tmp"; // For atomic writes

#[derive(Parser)]
#[command(name = "huffpack", version)]
#[command(about = "A static-Huffman file compressor.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into an artifact
    Encode {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Restore the original file from an artifact
    Decode {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), CodecError> {
    logger::init();

    let cli = Cli::parse();
    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    match cli.command {
        Commands::Encode { input, output } => run_encode(&input, &output),
        Commands::Decode { input, output } => run_decode(&input, &output),
    }
}

fn run_encode(input: &Path, output: &Path) -> Result<(), CodecError> {
    let data = fs::read(input)?;
    let artifact = huffpack::encode(&data)?;
    write_atomic(output, &artifact)?;

    tracing::info!(
        input = %format_bytes(data.len()),
        output = %format_bytes(artifact.len()),
        ratio = %ratio(artifact.len(), data.len()),
        "encoded {} -> {}",
        input.display(),
        output.display(),
    );
    Ok(())
}

fn run_decode(input: &Path, output: &Path) -> Result<(), CodecError> {
    let artifact = fs::read(input)?;
    let data = huffpack::decode(&artifact)?;
    write_atomic(output, &data)?;

    tracing::info!(
        input = %format_bytes(artifact.len()),
        output = %format_bytes(data.len()),
        "decoded {} -> {}",
        input.display(),
        output.display(),
    );
    Ok(())
}

// Write via a temp file and rename, so a failed run never leaves a partial
// artifact behind under the destination name.
fn write_atomic(path: &Path, data: &[u8]) -> Result<(), CodecError> {
    let temp_path = path.with_extension(TEMP_EXT);
    fs::write(&temp_path, data)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Format bytes into human-readable string (e.g. 1024 -> "1.00 KB")
fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

fn ratio(compressed: usize, original: usize) -> String {
    if original == 0 {
        return "n/a".to_string();
    }
    format!("{:.1}%", compressed as f64 * 100.0 / original as f64)
}
