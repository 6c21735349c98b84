// src/main.rs
mod logger;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use huffpack::analyzer::{self, Comparison};
use huffpack::artifact::{Artifact, DEFAULT_ARTIFACT_EXT};
use huffpack::{FrequencyTable, codec, utils};

#[derive(Parser)]
#[command(name = "huffpack", version = "0.1")]
#[command(about = "Huffman text compressor with a self-describing artifact format.", long_about = None)]
struct Cli {
    /// Log every stage at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a text file into an artifact
    Compress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore the text stored in an artifact
    Decompress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail if the payload ends in the middle of a code
        #[arg(long)]
        strict: bool,
    },
    /// Full cycle: compress, save, load, decompress, then report
    Demo {
        input: PathBuf,
        #[arg(long)]
        artifact: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// How many top terms to compare
        #[arg(long, default_value_t = analyzer::DEFAULT_TOP_N)]
        top: usize,
        #[arg(long)]
        strict: bool,
    },
    /// Show an artifact's header and code table
    Inspect { input: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    match cli.command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension(DEFAULT_ARTIFACT_EXT));
            compress_file(&input, &output).map(|_| ())
        }
        Commands::Decompress {
            input,
            output,
            strict,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("txt"));
            decompress_file(&input, &output, strict)
        }
        Commands::Demo {
            input,
            artifact,
            output,
            top,
            strict,
        } => {
            let artifact = artifact.unwrap_or_else(|| input.with_extension(DEFAULT_ARTIFACT_EXT));
            let output = output.unwrap_or_else(|| sibling_with_suffix(&input, "restored"));
            run_demo(&input, &artifact, &output, top, strict)
        }
        Commands::Inspect { input } => inspect(&input),
    }
}

/// Returns false when the input was empty and nothing was written.
fn compress_file(input: &Path, output: &Path) -> anyhow::Result<bool> {
    let text = utils::read_text(input).with_context(|| format!("reading {}", input.display()))?;
    let compressed = codec::compress(&text);
    if compressed.is_empty() {
        println!("{} is empty, nothing to compress.", input.display());
        return Ok(false);
    }

    Artifact::new(compressed)
        .save(output)
        .with_context(|| format!("saving {}", output.display()))?;
    println!("Compressed {} -> {}", input.display(), output.display());
    Ok(true)
}

fn decompress_file(input: &Path, output: &Path, strict: bool) -> anyhow::Result<()> {
    let artifact = Artifact::load(input).with_context(|| format!("loading {}", input.display()))?;
    let text = artifact
        .decompress(strict)
        .with_context(|| format!("decoding {}", input.display()))?;
    utils::write_text(output, &text).with_context(|| format!("writing {}", output.display()))?;
    println!("Decompressed {} -> {}", input.display(), output.display());
    Ok(())
}

fn run_demo(
    input: &Path,
    artifact_path: &Path,
    output: &Path,
    top_n: usize,
    strict: bool,
) -> anyhow::Result<()> {
    println!("{}", "=".repeat(50));
    println!("HUFFMAN ROUND TRIP (TXT -> BIN -> TXT)");
    println!("{}", "=".repeat(50));

    let original = utils::read_text(input).with_context(|| format!("reading {}", input.display()))?;
    if original.is_empty() {
        bail!("{} is empty, nothing to demonstrate", input.display());
    }
    let sample: String = original.chars().take(50).collect();
    println!("Original sample: {:?}...", sample.trim());

    let frequencies = FrequencyTable::from_text(&original);
    let compressed = codec::compress(&original);
    println!(
        "Codes: {} symbols, {:.3} bits/symbol on average",
        compressed.table.len(),
        compressed.table.average_code_length(&frequencies)
    );

    println!("\nSaving compressed data to {}", artifact_path.display());
    Artifact::new(compressed)
        .save(artifact_path)
        .with_context(|| format!("saving {}", artifact_path.display()))?;

    println!("Loading {} and decompressing to {}", artifact_path.display(), output.display());
    let loaded = Artifact::load(artifact_path)
        .with_context(|| format!("loading {}", artifact_path.display()))?;
    let restored = loaded.decompress(strict).context("decoding artifact")?;
    utils::write_text(output, &restored).with_context(|| format!("writing {}", output.display()))?;

    let original_size = utils::file_size(input);
    let compressed_size = utils::file_size(artifact_path);
    let restored_size = utils::file_size(output);

    println!("\n{} SIZES {}", "*".repeat(20), "*".repeat(20));
    println!(
        "  Original     ({}): {}",
        input.display(),
        utils::format_bytes(original_size)
    );
    println!(
        "  Compressed   ({}): {}",
        artifact_path.display(),
        utils::format_bytes(compressed_size)
    );
    println!(
        "  Decompressed ({}): {}",
        output.display(),
        utils::format_bytes(restored_size)
    );
    if let Some(pct) = utils::reduction_percent(original_size, compressed_size) {
        println!("  Space reduction: {pct:.2}%");
    }

    if original == restored {
        println!("\nContent check: OK, decompressed text matches the original.");
    } else {
        println!("\nContent check: FAILED, decompressed text differs from the original.");
    }

    print_comparison(&analyzer::compare_texts(&original, &restored, top_n));
    Ok(())
}

fn print_comparison(comparison: &Comparison) {
    println!("\n{}", "=".repeat(80));
    println!("TERM FREQUENCY CHECK (TOP {} WORDS)", comparison.top_n);
    println!("{}", "=".repeat(80));
    println!(
        "{:<4} | {:<30} | {:<30} | {:<8}",
        "No.", "ORIGINAL", "DECOMPRESSED", "MATCH"
    );
    println!("{}", "-".repeat(80));

    let cell = |entry: &Option<(String, usize)>| match entry {
        Some((term, count)) => format!("'{term}': {count}"),
        None => "'-': 0".to_string(),
    };
    for row in &comparison.rows {
        println!(
            "{:<4} | {:<30} | {:<30} | {:<8}",
            row.rank,
            cell(&row.original),
            cell(&row.restored),
            if row.matches() { "OK" } else { "FAIL" }
        );
    }

    if comparison.is_identical() {
        println!("\nTerm distribution is identical in the top {}.", comparison.top_n);
    } else {
        println!(
            "\nFound {} differences in the top {}.",
            comparison.mismatches(),
            comparison.top_n
        );
    }
}

fn inspect(input: &Path) -> anyhow::Result<()> {
    let artifact = Artifact::load(input).with_context(|| format!("loading {}", input.display()))?;
    println!("Artifact:  {}", input.display());
    println!("Created:   {}", artifact.created_at);
    println!("Payload:   {} bytes ({} bits)", artifact.payload.len(), artifact.bit_len());
    println!("Padding:   {} bits", artifact.padding);
    println!("Codes:     {}", artifact.table.len());

    let mut codes: Vec<_> = artifact.table.iter().collect();
    codes.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| a.0.cmp(&b.0)));
    for (symbol, code) in codes {
        println!("  {:<8} {}", format!("{symbol:?}"), code);
    }
    Ok(())
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!("{stem}_{suffix}.txt"))
}
