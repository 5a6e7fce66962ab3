//! Non-local means denoising for color images.
//!
//! The image is moved to CIE Lab with lightness on the 8-bit scale; lightness
//! is filtered with strength `h` and the two chroma planes jointly with
//! `h_color`. Patch distances are accumulated per search offset over the
//! whole plane, so the cost is `O(pixels * search_window²)` independent of
//! the template size.

use image::RgbImage;

use super::border::reflect101;
use super::color::{lab_to_rgb, rgb_to_lab, L_TO_U8};
use crate::error::{Error, Result};

/// Non-local means parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DenoiseParams {
    /// Filter strength for lightness. Larger removes more noise and detail.
    pub h: f32,
    /// Filter strength for the chroma planes.
    pub h_color: f32,
    /// Side of the square patch compared between pixels (odd).
    pub template_window: u32,
    /// Side of the square search area around each pixel.
    pub search_window: u32,
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            h: 5.0,
            h_color: 5.0,
            template_window: 3,
            search_window: 14,
        }
    }
}

impl DenoiseParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.h.is_finite() || self.h <= 0.0 {
            return Err(Error::invalid("denoise.h", self.h, "must be > 0"));
        }
        if !self.h_color.is_finite() || self.h_color <= 0.0 {
            return Err(Error::invalid("denoise.h_color", self.h_color, "must be > 0"));
        }
        if self.template_window == 0 {
            return Err(Error::invalid(
                "denoise.template_window",
                self.template_window,
                "must be >= 1",
            ));
        }
        if self.search_window == 0 {
            return Err(Error::invalid(
                "denoise.search_window",
                self.search_window,
                "must be >= 1",
            ));
        }
        Ok(())
    }
}

/// Tabulated `exp(-msd / h²)` over the normalised argument `msd / h²`,
/// cut off once weights drop below 1e-3. The table size does not depend on `h`.
struct WeightTable {
    /// `STEPS_PER_UNIT / h²`: maps a raw `msd` straight to a table index.
    index_scale: f32,
    table: Vec<f32>,
}

impl WeightTable {
    const STEPS_PER_UNIT: f32 = 256.0;

    fn new(h: f32) -> Self {
        let max_arg = 1000f32.ln();
        let len = (max_arg * Self::STEPS_PER_UNIT).ceil() as usize + 1;
        let table = (0..len)
            .map(|i| (-(i as f32) / Self::STEPS_PER_UNIT).exp())
            .collect();
        Self {
            index_scale: Self::STEPS_PER_UNIT / (h * h),
            table,
        }
    }

    #[inline]
    fn weight(&self, msd: f32) -> f32 {
        let idx = msd * self.index_scale;
        if idx.is_finite() {
            self.table.get(idx as usize).copied().unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

/// Box sum of `src` over a `(2r+1)²` window with reflect-101 borders.
fn box_sum(src: &[f32], w: usize, h: usize, r: usize, tmp: &mut [f32], dst: &mut [f32]) {
    let r = r as i64;
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        for x in 0..w {
            let mut s = 0.0;
            for k in -r..=r {
                s += row[reflect101(x as i64 + k, w)];
            }
            tmp[y * w + x] = s;
        }
    }
    for y in 0..h {
        for x in 0..w {
            let mut s = 0.0;
            for k in -r..=r {
                s += tmp[reflect101(y as i64 + k, h) * w + x];
            }
            dst[y * w + x] = s;
        }
    }
}

/// Jointly denoise a set of equally sized planes.
///
/// All planes share one weight per (pixel, candidate) pair, computed from the
/// patch distance averaged over planes and template pixels.
pub(crate) fn nl_means(
    planes: &[&[f32]],
    width: u32,
    height: u32,
    strength: f32,
    template_window: u32,
    search_window: u32,
) -> Vec<Vec<f32>> {
    let (w, h) = (width as usize, height as usize);
    let n = w * h;
    if n == 0 || planes.is_empty() {
        return planes.iter().map(|p| p.to_vec()).collect();
    }

    let tr = (template_window / 2) as usize;
    let sr = (search_window / 2) as i64;
    let norm = 1.0 / (((2 * tr + 1) * (2 * tr + 1)) as f32 * planes.len() as f32);
    let weights = WeightTable::new(strength);

    let mut acc = vec![vec![0.0f32; n]; planes.len()];
    let mut wsum = vec![0.0f32; n];
    let mut diff = vec![0.0f32; n];
    let mut tmp = vec![0.0f32; n];
    let mut dist = vec![0.0f32; n];
    let mut shifted_idx = vec![0usize; n];

    for dy in -sr..=sr {
        for dx in -sr..=sr {
            for y in 0..h {
                let sy = reflect101(y as i64 + dy, h);
                for x in 0..w {
                    shifted_idx[y * w + x] = sy * w + reflect101(x as i64 + dx, w);
                }
            }

            diff.iter_mut().for_each(|d| *d = 0.0);
            for plane in planes {
                for (i, d) in diff.iter_mut().enumerate() {
                    let e = plane[i] - plane[shifted_idx[i]];
                    *d += e * e;
                }
            }

            box_sum(&diff, w, h, tr, &mut tmp, &mut dist);

            for i in 0..n {
                let wt = weights.weight(dist[i] * norm);
                if wt == 0.0 {
                    continue;
                }
                let j = shifted_idx[i];
                wsum[i] += wt;
                for (dst, plane) in acc.iter_mut().zip(planes) {
                    dst[i] += wt * plane[j];
                }
            }
        }
    }

    for (dst, plane) in acc.iter_mut().zip(planes) {
        for i in 0..n {
            // The zero offset always contributes weight 1.
            dst[i] = if wsum[i] > 0.0 { dst[i] / wsum[i] } else { plane[i] };
        }
    }
    acc
}

/// Denoise an RGB image with colored non-local means.
pub fn denoise(img: &RgbImage, params: &DenoiseParams) -> RgbImage {
    let (w, h) = img.dimensions();
    let mut lab = rgb_to_lab(img);

    let l8: Vec<f32> = lab.l.iter().map(|&v| v * L_TO_U8).collect();
    let mut l_out = nl_means(
        &[l8.as_slice()],
        w,
        h,
        params.h,
        params.template_window,
        params.search_window,
    );
    let ab_out = nl_means(
        &[lab.a.as_slice(), lab.b.as_slice()],
        w,
        h,
        params.h_color,
        params.template_window,
        params.search_window,
    );

    lab.l = l_out
        .pop()
        .unwrap_or_default()
        .into_iter()
        .map(|v| v / L_TO_U8)
        .collect();
    let mut ab = ab_out.into_iter();
    if let (Some(a), Some(b)) = (ab.next(), ab.next()) {
        lab.a = a;
        lab.b = b;
    }
    lab_to_rgb(&lab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{noisy, rmse, two_tone};
    use image::Rgb;

    #[test]
    fn constant_plane_is_fixed_point() {
        let plane = vec![42.0f32; 16 * 9];
        let out = nl_means(&[plane.as_slice()], 16, 9, 5.0, 3, 7);
        assert!(out[0].iter().all(|&v| (v - 42.0).abs() < 1e-4));
    }

    #[test]
    fn weight_table_decays() {
        let t = WeightTable::new(5.0);
        assert!((t.weight(0.0) - 1.0).abs() < 1e-6);
        assert!(t.weight(10.0) < t.weight(1.0));
        assert_eq!(t.weight(1.0e6), 0.0);
    }

    #[test]
    fn weight_table_size_is_independent_of_strength() {
        let small = WeightTable::new(0.5);
        let huge = WeightTable::new(1.0e5);
        assert_eq!(small.table.len(), huge.table.len());
        // A very large strength makes every candidate count almost fully.
        assert!(huge.weight(1.0e4) > 0.99);
    }

    #[test]
    fn huge_strength_still_denoises_small_image() {
        let img = RgbImage::from_fn(6, 5, |x, y| Rgb([(x * 40) as u8, (y * 50) as u8, 90]));
        let params = DenoiseParams {
            h: 1.0e5,
            h_color: 1.0e5,
            ..DenoiseParams::default()
        };
        assert!(params.validate().is_ok());
        let out = denoise(&img, &params);
        assert_eq!(out.dimensions(), img.dimensions());
    }

    #[test]
    fn denoise_reduces_noise() {
        let clean = two_tone(48, 32, Rgb([70, 90, 120]), Rgb([190, 160, 140]));
        let dirty = noisy(&clean, 6.0, 7);
        let params = DenoiseParams {
            search_window: 7,
            ..DenoiseParams::default()
        };
        let out = denoise(&dirty, &params);
        assert_eq!(out.dimensions(), clean.dimensions());
        assert!(rmse(&out, &clean) < rmse(&dirty, &clean));
    }

    #[test]
    fn denoise_keeps_flat_color() {
        let img = RgbImage::from_pixel(12, 10, Rgb([120, 80, 60]));
        let out = denoise(&img, &DenoiseParams::default());
        for px in out.pixels() {
            for c in 0..3 {
                assert!((px[c] as i32 - img.get_pixel(0, 0)[c] as i32).abs() <= 1);
            }
        }
    }

    #[test]
    fn zero_strength_is_rejected() {
        let params = DenoiseParams {
            h: 0.0,
            ..DenoiseParams::default()
        };
        assert!(params.validate().is_err());
    }
}
