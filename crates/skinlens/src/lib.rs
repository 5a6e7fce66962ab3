//! skinlens — classical portrait enhancement and skin-type classification.
//!
//! Two independent tools share this crate:
//!
//! 1. **Enhancement** – a fixed chain of classical filters:
//!    non-local means denoise → CLAHE on lightness → gamma → gray-world
//!    white balance → bilateral smoothing → per-channel gain → saturation
//!    boost → blend with the input.
//! 2. **Classification** – a small CNN (burn, CPU backend) mapping a photo
//!    to one of `dry`, `normal`, `oily`.
//!
//! # Public API
//! - [`Enhancer`] and [`EnhanceConfig`] for the enhancement pipeline
//! - [`filters`] for running single stages
//! - [`classify::SkinTypeClassifier`] for inference
//! - [`load_rgb`] / [`save_rgb`] and the shared [`Error`] type

pub mod classify;
mod config;
mod enhancer;
mod error;
pub mod filters;
mod image_io;

#[cfg(test)]
pub(crate) mod test_utils;

pub use classify::{Prediction, SkinType, SkinTypeClassifier};
pub use config::EnhanceConfig;
pub use enhancer::{EnhanceStages, Enhancer};
pub use error::{Error, Result};
pub use filters::compose_side_by_side;
pub use image_io::{load_dynamic, load_rgb, save_rgb};
