//! Mixing the original back into the enhanced image, and side-by-side layout.

use image::{imageops, Rgb, RgbImage};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlendParams {
    /// Weight of the original image; the enhanced one gets `1 - alpha`.
    pub alpha: f32,
}

impl Default for BlendParams {
    fn default() -> Self {
        Self { alpha: 0.45 }
    }
}

impl BlendParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::invalid("blend.alpha", self.alpha, "must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// `round(alpha * original + (1 - alpha) * enhanced)` per sample.
///
/// Both images must have the same dimensions.
pub fn blend(original: &RgbImage, enhanced: &RgbImage, params: &BlendParams) -> RgbImage {
    debug_assert_eq!(original.dimensions(), enhanced.dimensions());
    let a = params.alpha;
    let b = 1.0 - a;
    let mut out = enhanced.clone();
    for (dst, &o) in out.iter_mut().zip(original.iter()) {
        *dst = (a * o as f32 + b * *dst as f32).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Place `left` and `right` next to each other on a black canvas.
pub fn compose_side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    imageops::replace(&mut canvas, left, 0, 0);
    imageops::replace(&mut canvas, right, left.width() as i64, 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_weights_and_rounds() {
        let orig = RgbImage::from_pixel(2, 2, Rgb([100, 0, 255]));
        let enh = RgbImage::from_pixel(2, 2, Rgb([200, 255, 0]));
        let out = blend(&orig, &enh, &BlendParams::default());
        // 45 + 110 = 155, 0.55 * 255 = 140.25, 0.45 * 255 = 114.75
        assert_eq!(out.get_pixel(0, 1), &Rgb([155, 140, 115]));
    }

    #[test]
    fn alpha_extremes_select_one_input() {
        let orig = RgbImage::from_pixel(1, 1, Rgb([10, 20, 30]));
        let enh = RgbImage::from_pixel(1, 1, Rgb([200, 210, 220]));
        assert_eq!(blend(&orig, &enh, &BlendParams { alpha: 1.0 }), orig);
        assert_eq!(blend(&orig, &enh, &BlendParams { alpha: 0.0 }), enh);
    }

    #[test]
    fn blending_an_image_with_itself_is_identity() {
        let img = RgbImage::from_fn(5, 4, |x, y| Rgb([(x * 50) as u8, (y * 60) as u8, 77]));
        assert_eq!(blend(&img, &img, &BlendParams::default()), img);
    }

    #[test]
    fn alpha_out_of_range_is_rejected() {
        assert!(BlendParams { alpha: 1.5 }.validate().is_err());
        assert!(BlendParams { alpha: f32::NAN }.validate().is_err());
    }

    #[test]
    fn side_by_side_layout() {
        let left = RgbImage::from_pixel(3, 2, Rgb([255, 0, 0]));
        let right = RgbImage::from_pixel(4, 3, Rgb([0, 0, 255]));
        let out = compose_side_by_side(&left, &right);
        assert_eq!(out.dimensions(), (7, 3));
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(3, 2), &Rgb([0, 0, 255]));
        // Below the shorter left image stays black.
        assert_eq!(out.get_pixel(1, 2), &Rgb([0, 0, 0]));
    }
}
