//! Writes a randomly initialised classifier record, handy for smoke-testing
//! `skinlens-classify` before trained weights are available.

use std::error::Error;
use std::path::PathBuf;

use skinlens::classify::{
    save_model, InferenceBackend, SkinTypeNet, SkinTypeNetConfig, DEFAULT_MODEL_PATH,
};

fn main() -> Result<(), Box<dyn Error>> {
    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

    let device = Default::default();
    let model = SkinTypeNet::<InferenceBackend>::new(&SkinTypeNetConfig::default(), &device);
    save_model(&model, &out)?;
    println!("Wrote untrained model to {}", out.display());
    Ok(())
}
