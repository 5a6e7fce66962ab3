//! Per-pixel tone operations: gamma LUT, channel gains, saturation.

use image::RgbImage;

use super::color::scale_saturation;
use crate::error::{Error, Result};

/// Gamma correction parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GammaParams {
    /// Display gamma; values above 1 brighten mid-tones.
    pub gamma: f32,
}

impl Default for GammaParams {
    fn default() -> Self {
        Self { gamma: 1.8 }
    }
}

impl GammaParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(Error::invalid("gamma.gamma", self.gamma, "must be > 0"));
        }
        Ok(())
    }
}

/// Per-channel multiplicative gains, by channel of the RGB buffer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorGainParams {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Default for ColorGainParams {
    fn default() -> Self {
        Self {
            red: 1.1,
            green: 1.0,
            blue: 1.2,
        }
    }
}

impl ColorGainParams {
    pub(crate) fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("color_gain.red", self.red),
            ("color_gain.green", self.green),
            ("color_gain.blue", self.blue),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::invalid(name, v, "must be finite and >= 0"));
            }
        }
        Ok(())
    }

    fn as_array(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }
}

/// HSV saturation scaling.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SaturationParams {
    pub factor: f32,
}

impl Default for SaturationParams {
    fn default() -> Self {
        Self { factor: 1.3 }
    }
}

impl SaturationParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.factor.is_finite() || self.factor < 0.0 {
            return Err(Error::invalid(
                "saturation.factor",
                self.factor,
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// 256-entry gamma LUT: `trunc((i / 255)^(1 / gamma) * 255)`.
pub(crate) fn gamma_lut(gamma: f32) -> [u8; 256] {
    let inv = 1.0 / gamma as f64;
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = ((i as f64 / 255.0).powf(inv) * 255.0).clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Map every sample through a 256-entry gamma LUT.
pub fn apply_gamma(img: &RgbImage, params: &GammaParams) -> RgbImage {
    let lut = gamma_lut(params.gamma);
    let mut out = img.clone();
    for v in out.iter_mut() {
        *v = lut[*v as usize];
    }
    out
}

/// Multiply each channel by its gain, clip to the 8-bit range and truncate.
pub fn apply_color_gain(img: &RgbImage, params: &ColorGainParams) -> RgbImage {
    let gains = params.as_array();
    let mut out = img.clone();
    for px in out.pixels_mut() {
        for (c, g) in px.0.iter_mut().zip(gains) {
            *c = (*c as f32 * g).clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Scale HSV saturation by `params.factor`, clamped to full saturation.
pub fn apply_saturation(img: &RgbImage, params: &SaturationParams) -> RgbImage {
    scale_saturation(img, params.factor)
}
