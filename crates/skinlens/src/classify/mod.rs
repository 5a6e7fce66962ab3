//! Skin-type classification with a small convolutional network.
//!
//! Weights are stored as burn binary records. [`SkinTypeClassifier::load`]
//! reads them once; every call to `classify_*` then runs a single forward
//! pass on the CPU backend.

mod classifier;
mod label;
mod model;
mod preprocess;

pub use classifier::{
    save_model, ClassifierConfig, InferenceBackend, Prediction, SkinTypeClassifier,
    DEFAULT_MODEL_PATH,
};
pub use label::SkinType;
pub use model::{SkinTypeNet, SkinTypeNetConfig, NUM_CLASSES};
pub use preprocess::{preprocess, DEFAULT_INPUT_SIZE};
