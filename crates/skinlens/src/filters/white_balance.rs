//! Retinex-style gray-world white balance.
//!
//! Every channel is scaled so its mean matches the mean over all channels,
//! then nudged by a fixed per-channel adjustment. A small offset keeps
//! black channels from dividing by zero.

use image::RgbImage;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WhiteBalanceParams {
    /// Added to every sample before the means are taken.
    pub offset: f32,
    /// Extra multiplier per buffer channel, applied after gray-world scaling.
    pub channel_adjust: [f32; 3],
}

impl Default for WhiteBalanceParams {
    fn default() -> Self {
        Self {
            offset: 1.0,
            channel_adjust: [0.9, 1.1, 1.0],
        }
    }
}

impl WhiteBalanceParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(Error::invalid(
                "white_balance.offset",
                self.offset,
                "must be finite and >= 0",
            ));
        }
        if self
            .channel_adjust
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(Error::invalid(
                "white_balance.channel_adjust",
                format!("{:?}", self.channel_adjust),
                "entries must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Per-channel means of `sample + offset`.
fn channel_means(img: &RgbImage, offset: f64) -> [f64; 3] {
    let mut sums = [0f64; 3];
    for px in img.pixels() {
        for (s, &v) in sums.iter_mut().zip(px.0.iter()) {
            *s += v as f64 + offset;
        }
    }
    let n = (img.width() as f64 * img.height() as f64).max(1.0);
    sums.map(|s| s / n)
}

pub fn retinex_white_balance(img: &RgbImage, params: &WhiteBalanceParams) -> RgbImage {
    if img.width() == 0 || img.height() == 0 {
        return img.clone();
    }

    let offset = params.offset as f64;
    let means = channel_means(img, offset);
    let avg = means.iter().sum::<f64>() / 3.0;

    let mut gains = [1f32; 3];
    for c in 0..3 {
        let scale = if means[c] > 0.0 { avg / means[c] } else { 1.0 };
        gains[c] = (scale * params.channel_adjust[c] as f64) as f32;
    }
    tracing::debug!(?means, ?gains, "white balance gains");

    let mut out = img.clone();
    for px in out.pixels_mut() {
        for (v, g) in px.0.iter_mut().zip(gains) {
            *v = ((*v as f32 + params.offset) * g).clamp(0.0, 255.0) as u8;
        }
    }
    out
}
