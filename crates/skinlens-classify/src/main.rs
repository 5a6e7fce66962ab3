//! skinlens-classify — predict skin type for each photo given on the command line.

use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use skinlens::classify::{
    ClassifierConfig, InferenceBackend, DEFAULT_INPUT_SIZE, DEFAULT_MODEL_PATH,
};
use skinlens::{Prediction, SkinTypeClassifier};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

const USAGE: &str = "Usage: skinlens-classify <image_path> [<image_path> ...]";

#[derive(Parser, Debug)]
#[command(name = "skinlens-classify")]
#[command(about = "Predict skin type (dry, normal, oily) for one or more images")]
#[command(version)]
struct Cli {
    /// Model weights (burn binary record).
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Side length images are resized to before inference.
    #[arg(long, default_value_t = DEFAULT_INPUT_SIZE)]
    input_size: u32,

    /// Images to classify, in output order.
    #[arg(value_name = "IMAGE")]
    images: Vec<PathBuf>,
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
    let code = run(&cli, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Classify every image in `cli.images`, one line per image on `out`.
///
/// Returns the process exit code; usage problems are reported on `err`.
fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> CliResult<i32> {
    if cli.images.is_empty() {
        writeln!(err, "{USAGE}")?;
        writeln!(err, "Error: at least one image path is required")?;
        return Ok(1);
    }

    let config = ClassifierConfig {
        model_path: cli.model.clone(),
        input_size: cli.input_size,
        ..ClassifierConfig::default()
    };
    let classifier = SkinTypeClassifier::<InferenceBackend>::load(&config)?;

    for path in &cli.images {
        let prediction = classifier.classify_path(path)?;
        tracing::debug!(
            confidence = prediction.confidence(),
            "{}: {}",
            path.display(),
            prediction.label
        );
        writeln!(out, "{}", format_prediction(path, &prediction))?;
    }
    Ok(0)
}

fn format_prediction(path: &Path, prediction: &Prediction) -> String {
    format!("Image: {} | Predicted Label: {}", path.display(), prediction.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use skinlens::classify::{save_model, SkinTypeNet, SkinTypeNetConfig};
    use skinlens::SkinType;

    #[test]
    fn output_line_format() {
        let pred = Prediction {
            label: SkinType::Oily,
            probabilities: [0.1, 0.2, 0.7],
        };
        assert_eq!(
            format_prediction(Path::new("faces/a.jpg"), &pred),
            "Image: faces/a.jpg | Predicted Label: oily"
        );
    }

    #[test]
    fn defaults_and_multiple_paths() {
        let cli = Cli::try_parse_from(["skinlens-classify", "a.jpg", "b.png"]).unwrap();
        assert_eq!(cli.model, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(cli.input_size, 224);
        assert_eq!(cli.images, vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]);
    }

    #[test]
    fn no_paths_prints_usage_and_exits_one() {
        let cli = Cli::try_parse_from(["skinlens-classify", "--model", "m.bin"]).unwrap();
        assert!(cli.images.is_empty());

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run(&cli, &mut out, &mut err).unwrap();
        assert_eq!(code, 1);
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert_eq!(
            err.lines().collect::<Vec<_>>(),
            [USAGE, "Error: at least one image path is required"]
        );
    }

    fn write_model_and_images(dir: &Path) -> (PathBuf, Vec<PathBuf>) {
        let model_path = dir.join("skin.bin");
        let model = SkinTypeNet::<InferenceBackend>::new(
            &SkinTypeNetConfig::default(),
            &Default::default(),
        );
        save_model(&model, &model_path).unwrap();

        let images = ["first.png", "second.png"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let path = dir.join(name);
                let img = RgbImage::from_fn(20, 16, |x, y| {
                    Rgb([(x * 12) as u8, (y * 15) as u8, 60 + 80 * i as u8])
                });
                skinlens::save_rgb(&path, &img).unwrap();
                path
            })
            .collect();
        (model_path, images)
    }

    #[test]
    fn prints_one_line_per_image_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let (model, images) = write_model_and_images(tmp.path());
        let cli = Cli {
            model,
            input_size: 16,
            images: images.clone(),
        };

        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(run(&cli, &mut out, &mut err).unwrap(), 0);
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for (line, path) in lines.iter().zip(&images) {
            let prefix = format!("Image: {} | Predicted Label: ", path.display());
            let label = line.strip_prefix(&prefix).unwrap();
            assert!(label.parse::<SkinType>().is_ok(), "{line}");
        }
    }

    #[test]
    fn missing_model_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = Cli {
            model: tmp.path().join("absent.bin"),
            input_size: 16,
            images: vec![tmp.path().join("face.png")],
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert!(run(&cli, &mut out, &mut err).is_err());
        assert!(out.is_empty());
    }
}
