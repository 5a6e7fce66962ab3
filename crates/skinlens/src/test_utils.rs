//! Synthetic images shared by the filter and pipeline unit tests.

use image::{Rgb, RgbImage};

/// Left half `left`, right half `right` (split at `w / 2`).
pub(crate) fn two_tone(w: u32, h: u32, left: Rgb<u8>, right: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(w, h, |x, _| if x < w / 2 { left } else { right })
}

/// Add seeded zero-mean Gaussian noise via `imageproc`.
pub(crate) fn noisy(img: &RgbImage, sigma: f64, seed: u64) -> RgbImage {
    imageproc::noise::gaussian_noise(img, 0.0, sigma, seed)
}

pub(crate) fn rmse(a: &RgbImage, b: &RgbImage) -> f64 {
    imageproc::stats::root_mean_squared_error(a, b)
}

/// Skin-toned disc on a cooler background with a soft vertical light falloff.
pub(crate) fn portrait(w: u32, h: u32) -> RgbImage {
    let cx = w as f32 / 2.0;
    let cy = h as f32 / 2.0;
    let r = w.min(h) as f32 * 0.35;
    RgbImage::from_fn(w, h, |x, y| {
        let shade = 1.0 - 0.4 * y as f32 / h.max(1) as f32;
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let base = if dx * dx + dy * dy <= r * r {
            [205.0, 150.0, 125.0]
        } else {
            [70.0, 85.0, 105.0]
        };
        Rgb(base.map(|v: f32| (v * shade) as u8))
    })
}
