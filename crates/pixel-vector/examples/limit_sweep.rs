//! Example: how the region size cap fragments large color areas.
//!
//! Loads one image and converts it once per requested cap, reporting region
//! and group counts, body size and timing for each run. Results are written
//! to a JSON file next to the input image.
//!
//! Run from the workspace root:
//!   cargo run -p pixel-vector --example limit_sweep -- --help
//!   cargo run -p pixel-vector --example limit_sweep -- images/bonsai.png

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use pixel_vector::{Converter, ConversionStats, ExtractConfig, load_rgba};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Convert one image with several region size caps")]
struct Args {
    /// Input image (PNG, JPEG, BMP or GIF)
    input: PathBuf,

    /// Region caps to try
    #[arg(long, value_delimiter = ',', default_value = "1,16,100,500,5000")]
    limits: Vec<usize>,

    /// Output JSON path (default: <input stem>_limits.json next to input)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct SweepResult {
    limit: usize,
    /// Wall-clock time for the scan and emission, in milliseconds.
    elapsed_ms: f64,
    body_bytes: usize,
    stats: ConversionStats,
}

fn default_out(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let dir = input.parent().unwrap_or(Path::new("."));
    dir.join(format!("{stem}_limits.json"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let out_path = args.out.clone().unwrap_or_else(|| default_out(&args.input));

    let grid = load_rgba(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    println!(
        "loaded {}: {}x{}",
        args.input.display(),
        grid.width(),
        grid.height()
    );

    let mut results = Vec::with_capacity(args.limits.len());
    for &limit in &args.limits {
        let converter = Converter {
            extract: ExtractConfig {
                limit,
                ..ExtractConfig::default()
            },
            ..Converter::default()
        };

        let t0 = Instant::now();
        let conv = converter.convert(&grid.as_view());
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

        println!(
            "  limit {limit:>6}: {:>6} regions, {:>6} groups, largest {:>6}  ({elapsed_ms:.2} ms)",
            conv.stats.regions, conv.stats.groups, conv.stats.largest_region
        );

        results.push(SweepResult {
            limit,
            elapsed_ms,
            body_bytes: conv.body.len(),
            stats: conv.stats,
        });
    }

    let json = serde_json::to_string_pretty(&results).context("serializing results")?;
    std::fs::write(&out_path, json)
        .with_context(|| format!("writing {}", out_path.display()))?;
    println!("results written to {}", out_path.display());

    Ok(())
}
