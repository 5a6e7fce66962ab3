//! Image to tensor conversion for the classifier input.

use burn::tensor::TensorData;
use image::imageops::FilterType;
use image::DynamicImage;

/// Input side length the stock model was trained with.
pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// Resize to `input_size²` (bilinear), scale to `[0, 1]` and lay out as NCHW `[1, 3, S, S]`.
pub fn preprocess(image: &DynamicImage, input_size: u32) -> TensorData {
    let rgb = image
        .resize_exact(input_size, input_size, FilterType::Triangle)
        .to_rgb8();
    let s = input_size as usize;
    let plane = s * s;
    let mut data = vec![0.0f32; 3 * plane];
    for (i, px) in rgb.pixels().enumerate() {
        for c in 0..3 {
            data[c * plane + i] = px[c] as f32 / 255.0;
        }
    }
    TensorData::new(data, [1, 3, s, s])
}
