//! Edge-preserving bilateral smoothing.
//!
//! Support is the disc of radius `diameter / 2`. The range kernel uses the
//! L1 distance over the three channels, so a pixel pair gets a single weight
//! shared by all channels.

use image::RgbImage;

use super::border::reflect101;
use crate::error::{Error, Result};

/// Bilateral filter parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    /// Neighborhood diameter in pixels.
    pub diameter: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 5,
            sigma_color: 25.0,
            sigma_space: 25.0,
        }
    }
}

impl BilateralParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.diameter == 0 {
            return Err(Error::invalid(
                "bilateral.diameter",
                self.diameter,
                "must be >= 1",
            ));
        }
        for (name, v) in [
            ("bilateral.sigma_color", self.sigma_color),
            ("bilateral.sigma_space", self.sigma_space),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::invalid(name, v, "must be > 0"));
            }
        }
        Ok(())
    }
}

/// Spatial taps `(dx, dy, weight)` inside the disc.
fn space_kernel(radius: i64, sigma_space: f32) -> Vec<(i64, i64, f32)> {
    let coeff = -0.5 / (sigma_space as f64 * sigma_space as f64);
    let mut taps = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f64;
            if r2.sqrt() > radius as f64 {
                continue;
            }
            taps.push((dx, dy, (r2 * coeff).exp() as f32));
        }
    }
    taps
}

/// Range weights indexed by the L1 color distance, `0..=3 * 255`.
fn color_table(sigma_color: f32) -> Vec<f32> {
    let coeff = -0.5 / (sigma_color as f64 * sigma_color as f64);
    (0..=3 * 255)
        .map(|d| {
            let d = d as f64;
            (d * d * coeff).exp() as f32
        })
        .collect()
}

/// Bilateral smoothing with reflect-101 borders; output is rounded per sample.
pub fn bilateral(img: &RgbImage, params: &BilateralParams) -> RgbImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }
    let radius = (params.diameter / 2) as i64;
    let taps = space_kernel(radius, params.sigma_space);
    let range = color_table(params.sigma_color);

    let src = img.as_raw();
    let (wu, hu) = (w as usize, h as usize);
    let mut out = RgbImage::new(w, h);

    for y in 0..hu {
        for x in 0..wu {
            let c0 = &src[(y * wu + x) * 3..(y * wu + x) * 3 + 3];
            let mut sum = [0f32; 3];
            let mut wsum = 0f32;
            for &(dx, dy, ws) in &taps {
                let sx = reflect101(x as i64 + dx, wu);
                let sy = reflect101(y as i64 + dy, hu);
                let off = (sy * wu + sx) * 3;
                let c = &src[off..off + 3];
                let dist = c
                    .iter()
                    .zip(c0)
                    .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() as usize)
                    .sum::<usize>();
                let wt = ws * range[dist];
                wsum += wt;
                for (s, &v) in sum.iter_mut().zip(c) {
                    *s += wt * v as f32;
                }
            }
            let px = out.get_pixel_mut(x as u32, y as u32);
            for (dst, s) in px.0.iter_mut().zip(sum) {
                *dst = (s / wsum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}
