use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use pixel_vector::{
    Connectivity, ConversionStats, Converter, ExtractConfig, Pitch, SUPPORTED_EXTENSIONS,
    ShapeStyle, Template, is_supported_extension, load_rgba, output_path, save_document,
};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "pixelart_svg", version)]
#[command(about = "Convert pixel art into an SVG of grouped same-color rectangles")]
struct Cli {
    /// Input image (png, jpg, jpeg, bmp or gif)
    input: PathBuf,
    /// Directory receiving `<input stem>.svg`
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,
    /// SVG skeleton with #VBX#, #VBY# and the shape marker line
    #[arg(long)]
    template: Option<PathBuf>,
    /// JSON settings file; flags below override its values
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Maximum pixels per region
    #[arg(long)]
    limit: Option<usize>,
    /// Square edge length in pixel units
    #[arg(long)]
    pixel_size: Option<f64>,
    /// Spacing between squares in pixel units
    #[arg(long)]
    gap: Option<f64>,
    #[arg(long, value_enum)]
    connectivity: Option<ConnectivityArg>,
    /// Write run statistics and the effective settings as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConnectivityArg {
    C4,
    C8,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(arg: ConnectivityArg) -> Self {
        match arg {
            ConnectivityArg::C4 => Connectivity::C4,
            ConnectivityArg::C8 => Connectivity::C8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    extract: ExtractConfig,
    pitch: Pitch,
    style: ShapeStyle,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    input: &'a Path,
    output: &'a Path,
    settings: &'a Settings,
    stats: ConversionStats,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported through the error path too.
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    ensure_input(&cli.input)?;

    let settings = match &cli.settings {
        Some(path) => read_json(path)
            .with_context(|| format!("reading settings at {}", path.display()))?,
        None => Settings::default(),
    };
    let settings = apply_overrides(settings, cli);

    let grid = load_rgba(&cli.input)?;

    let template = match &cli.template {
        Some(path) => Template::from_file(path)?,
        None => Template::default(),
    };

    let converter = Converter::new(settings.extract, settings.pitch, settings.style.clone());
    let conv = converter.convert(&grid.as_view());
    info!(
        "{} regions: {} groups, {} single pixels, largest {}",
        conv.stats.regions, conv.stats.groups, conv.stats.single_pixels, conv.stats.largest_region
    );

    let svg = conv.render(&template).context("filling the document template")?;

    if !cli.out_dir.exists() {
        info!("Create {}", cli.out_dir.display());
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("creating output directory {}", cli.out_dir.display()))?;
    }

    let out = output_path(&cli.out_dir, &cli.input);
    save_document(&out, &svg)?;

    if let Some(report) = &cli.report {
        write_json(
            report,
            &Report {
                input: &cli.input,
                output: &out,
                settings: &settings,
                stats: conv.stats,
            },
        )?;
    }

    Ok(())
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(limit) = cli.limit {
        settings.extract.limit = limit;
    }
    if let Some(connectivity) = cli.connectivity {
        settings.extract.connectivity = connectivity.into();
    }
    if let Some(pixel_size) = cli.pixel_size {
        settings.pitch.pixel_size = pixel_size;
    }
    if let Some(gap) = cli.gap {
        settings.pitch.gap = gap;
    }
    settings
}

fn ensure_input(path: &Path) -> Result<()> {
    if !is_supported_extension(path) {
        bail!(
            "unsupported input {}: expected one of {}",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    if !path.exists() {
        bail!("input file does not exist: {}", path.display());
    }
    if !path.is_file() {
        bail!("input path is not a file: {}", path.display());
    }
    Ok(())
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}
