//! skinlens-enhance — run the enhancement pipeline on one photo and show the result.

use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use skinlens::{compose_side_by_side, EnhanceConfig, EnhanceStages, Enhancer};

#[cfg(feature = "viewer")]
mod viewer;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

const READ_ERROR_MESSAGE: &str =
    "Error: Unable to read the image. Please check the file path or format.";

#[derive(Parser, Debug)]
#[command(name = "skinlens-enhance")]
#[command(about = "Denoise, equalize, white-balance and color-correct a portrait photo")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    image: PathBuf,

    /// JSON file overriding pipeline parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the enhanced image here (format from extension).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the original and enhanced images side by side.
    #[arg(long)]
    comparison_out: Option<PathBuf>,

    /// Directory receiving one PNG per pipeline stage.
    #[arg(long)]
    save_stages: Option<PathBuf>,

    /// Do not open the viewer window.
    #[arg(long)]
    no_display: bool,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli, &mut std::io::stdout().lock())
}

fn build_enhancer(config: Option<&Path>) -> CliResult<Enhancer> {
    match config {
        Some(path) => {
            tracing::info!("loading pipeline config from {}", path.display());
            Ok(Enhancer::with_config(EnhanceConfig::from_json_file(path)?)?)
        }
        None => Ok(Enhancer::new()),
    }
}

/// Enhance `cli.image`; an unreadable input is reported on `out`, not as an error.
fn run(cli: &Cli, out: &mut impl Write) -> CliResult<()> {
    let enhancer = build_enhancer(cli.config.as_deref())?;

    let image = match skinlens::load_rgb(&cli.image) {
        Ok(img) => img,
        Err(err) if err.is_image_load() => {
            tracing::debug!("{err}");
            writeln!(out, "{READ_ERROR_MESSAGE}")?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let stages = enhancer.enhance_with_stages(&image);

    if let Some(dir) = &cli.save_stages {
        save_stages(dir, &stages)?;
    }
    if let Some(out) = &cli.out {
        skinlens::save_rgb(out, &stages.blended)?;
        tracing::info!("wrote {}", out.display());
    }
    if let Some(out) = &cli.comparison_out {
        skinlens::save_rgb(out, &compose_side_by_side(&image, &stages.blended))?;
        tracing::info!("wrote {}", out.display());
    }

    if !cli.no_display {
        display(image, stages.blended)?;
    }
    Ok(())
}

fn stage_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.png"))
}

fn save_stages(dir: &Path, stages: &EnhanceStages) -> CliResult<()> {
    std::fs::create_dir_all(dir)?;
    for (name, img) in stages.named() {
        skinlens::save_rgb(&stage_path(dir, name), img)?;
    }
    tracing::info!("wrote {} stage images to {}", stages.named().len(), dir.display());
    Ok(())
}

#[cfg(feature = "viewer")]
fn display(original: image::RgbImage, enhanced: image::RgbImage) -> CliResult<()> {
    viewer::show(original, enhanced)
}

#[cfg(not(feature = "viewer"))]
fn display(_original: image::RgbImage, _enhanced: image::RgbImage) -> CliResult<()> {
    tracing::warn!("built without the `viewer` feature; use --out or --comparison-out instead");
    Ok(())
}
