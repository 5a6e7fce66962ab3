//! Skin-type inference on top of [`SkinTypeNet`].

use std::path::{Path, PathBuf};

use burn::module::Module;
use burn::record::{BinFileRecorder, FullPrecisionSettings};
use burn::tensor::{backend::Backend, Tensor};
use burn_ndarray::NdArray;
use image::DynamicImage;

use super::label::SkinType;
use super::model::{SkinTypeNet, SkinTypeNetConfig, NUM_CLASSES};
use super::preprocess::{preprocess, DEFAULT_INPUT_SIZE};
use crate::error::{Error, Result};
use crate::image_io::load_dynamic;

/// CPU backend used by the command line tools.
pub type InferenceBackend = NdArray<f32>;

/// Default model record, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/skin_type_classifier.bin";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    /// Side length images are resized to before inference.
    pub input_size: u32,
    pub net: SkinTypeNetConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            input_size: DEFAULT_INPUT_SIZE,
            net: SkinTypeNetConfig::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        validate_input_size(self.input_size)
    }
}

// Three 2x2 pools need at least 8 pixels to leave a non-empty map.
fn validate_input_size(input_size: u32) -> Result<()> {
    if input_size < 8 {
        return Err(Error::invalid(
            "classifier.input_size",
            input_size,
            "must be >= 8",
        ));
    }
    Ok(())
}

/// One classification result.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Prediction {
    pub label: SkinType,
    /// Softmax probabilities in [`SkinType::ALL`] order.
    pub probabilities: [f32; NUM_CLASSES],
}

impl Prediction {
    /// Arg-max over `probabilities`; ties resolve to the lowest index.
    fn from_probabilities(probabilities: [f32; NUM_CLASSES]) -> Self {
        let mut best = 0;
        for (i, &p) in probabilities.iter().enumerate().skip(1) {
            if p > probabilities[best] {
                best = i;
            }
        }
        Self {
            label: SkinType::ALL[best],
            probabilities,
        }
    }

    pub fn confidence(&self) -> f32 {
        self.probabilities[self.label.index()]
    }
}

/// Loaded classifier. Load once, classify many images.
pub struct SkinTypeClassifier<B: Backend = InferenceBackend> {
    model: SkinTypeNet<B>,
    device: B::Device,
    input_size: u32,
}

impl<B: Backend> SkinTypeClassifier<B> {
    /// Load model weights from `config.model_path` on the default device.
    pub fn load(config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let device = B::Device::default();
        let path = &config.model_path;
        if !path.is_file() {
            return Err(Error::ModelLoad {
                path: path.clone(),
                message: "file not found".to_string(),
            });
        }
        let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
        let model = SkinTypeNet::<B>::new(&config.net, &device)
            .load_file(path.clone(), &recorder, &device)
            .map_err(|err| Error::ModelLoad {
                path: path.clone(),
                message: err.to_string(),
            })?;
        tracing::info!(path = %path.display(), input_size = config.input_size, "model loaded");
        Ok(Self {
            model,
            device,
            input_size: config.input_size,
        })
    }

    /// Wrap an in-memory model. `input_size` must be at least 8.
    pub fn from_model(model: SkinTypeNet<B>, input_size: u32) -> Result<Self> {
        validate_input_size(input_size)?;
        Ok(Self {
            model,
            device: B::Device::default(),
            input_size,
        })
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    pub fn model(&self) -> &SkinTypeNet<B> {
        &self.model
    }

    pub fn classify_image(&self, image: &DynamicImage) -> Result<Prediction> {
        let input = Tensor::<B, 4>::from_data(preprocess(image, self.input_size), &self.device);
        let probs = self
            .model
            .forward_probs(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|err| Error::Inference(format!("{err:?}")))?;
        let probabilities: [f32; NUM_CLASSES] = probs.as_slice().try_into().map_err(|_| {
            Error::Inference(format!(
                "expected {NUM_CLASSES} probabilities, got {}",
                probs.len()
            ))
        })?;
        let prediction = Prediction::from_probabilities(probabilities);
        tracing::debug!(label = %prediction.label, ?probabilities, "classified");
        Ok(prediction)
    }

    pub fn classify_path(&self, path: &Path) -> Result<Prediction> {
        let image = load_dynamic(path)?;
        self.classify_image(&image)
    }
}

/// Write `model` as a full-precision binary record.
pub fn save_model<B: Backend>(model: &SkinTypeNet<B>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
    model
        .clone()
        .save_file(path.to_path_buf(), &recorder)
        .map_err(|err| Error::ModelSave {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}
