//! Color space conversions between interleaved RGB buffers and planar
//! CIE Lab / HSV representations.

use image::{Rgb, RgbImage};
use palette::{FromColor, Hsv, Lab, Srgb};

/// Scale from CIE L* (0..=100) to the 8-bit lightness range.
pub(crate) const L_TO_U8: f32 = 255.0 / 100.0;

/// Planar CIE Lab (D65) image.
///
/// `l` is in 0..=100, `a`/`b` are unbounded but in practice within ±128.
#[derive(Debug, Clone)]
pub(crate) struct LabPlanes {
    pub width: u32,
    pub height: u32,
    pub l: Vec<f32>,
    pub a: Vec<f32>,
    pub b: Vec<f32>,
}

impl LabPlanes {
    /// Lightness quantized to the 8-bit range.
    pub fn l_u8(&self) -> Vec<u8> {
        self.l
            .iter()
            .map(|&v| (v * L_TO_U8).round().clamp(0.0, 255.0) as u8)
            .collect()
    }

    /// Replace lightness from an 8-bit plane.
    pub fn set_l_u8(&mut self, plane: &[u8]) {
        debug_assert_eq!(plane.len(), self.l.len());
        for (dst, &v) in self.l.iter_mut().zip(plane) {
            *dst = v as f32 / L_TO_U8;
        }
    }
}

fn srgb_of(px: &Rgb<u8>) -> Srgb<f32> {
    Srgb::new(px[0], px[1], px[2]).into_format::<f32>()
}

fn rgb_of(srgb: Srgb<f32>) -> Rgb<u8> {
    let c: Srgb<u8> = srgb.into_format();
    Rgb([c.red, c.green, c.blue])
}

/// Convert an sRGB image to planar Lab.
pub(crate) fn rgb_to_lab(img: &RgbImage) -> LabPlanes {
    let n = img.pixels().len();
    let mut planes = LabPlanes {
        width: img.width(),
        height: img.height(),
        l: Vec::with_capacity(n),
        a: Vec::with_capacity(n),
        b: Vec::with_capacity(n),
    };
    for px in img.pixels() {
        let lab: Lab = Lab::from_color(srgb_of(px));
        planes.l.push(lab.l);
        planes.a.push(lab.a);
        planes.b.push(lab.b);
    }
    planes
}

/// Convert planar Lab back to sRGB, clamping out-of-gamut colors.
pub(crate) fn lab_to_rgb(planes: &LabPlanes) -> RgbImage {
    let mut out = RgbImage::new(planes.width, planes.height);
    for (i, px) in out.pixels_mut().enumerate() {
        let lab = Lab::new(planes.l[i], planes.a[i], planes.b[i]);
        *px = rgb_of(Srgb::from_color(lab));
    }
    out
}

/// Multiply HSV saturation of every pixel by `factor`, clamped to 1.
pub(crate) fn scale_saturation(img: &RgbImage, factor: f32) -> RgbImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        let mut hsv: Hsv = Hsv::from_color(srgb_of(px));
        hsv.saturation = (hsv.saturation * factor).clamp(0.0, 1.0);
        *px = rgb_of(Srgb::from_color(hsv));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_round_trip_is_close() {
        let mut img = RgbImage::new(4, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        img.put_pixel(2, 0, Rgb([200, 40, 90]));
        img.put_pixel(3, 0, Rgb([12, 180, 240]));

        let back = lab_to_rgb(&rgb_to_lab(&img));
        for (a, b) in img.pixels().zip(back.pixels()) {
            for c in 0..3 {
                assert!((a[c] as i32 - b[c] as i32).abs() <= 1, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn white_quantizes_to_full_lightness() {
        let img = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        let lab = rgb_to_lab(&img);
        assert!(lab.l_u8().iter().all(|&v| v == 255));
        assert!(lab.a.iter().all(|v| v.abs() < 0.5));
    }

    #[test]
    fn set_l_u8_inverts_quantization() {
        let img = RgbImage::from_pixel(1, 1, Rgb([90, 120, 60]));
        let mut lab = rgb_to_lab(&img);
        let q = lab.l_u8();
        lab.set_l_u8(&q);
        assert!((lab.l[0] - q[0] as f32 / L_TO_U8).abs() < 1e-4);
    }

    #[test]
    fn saturation_keeps_gray_gray() {
        let img = RgbImage::from_pixel(3, 3, Rgb([128, 128, 128]));
        let out = scale_saturation(&img, 1.3);
        assert_eq!(out, img);
    }

    #[test]
    fn saturation_spreads_channels() {
        let img = RgbImage::from_pixel(1, 1, Rgb([180, 120, 100]));
        let out = scale_saturation(&img, 1.3);
        let px = out.get_pixel(0, 0);
        // Value (max channel) is preserved, min channel moves away from it.
        assert!((px[0] as i32 - 180).abs() <= 1);
        assert!(px[2] < 100);
    }
}
