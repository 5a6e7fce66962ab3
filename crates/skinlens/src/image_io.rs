//! Image decoding and encoding helpers.
//!
//! Everything downstream works on 8-bit RGB buffers; alpha and higher bit
//! depths are dropped at load time.

use std::path::Path;

use image::{DynamicImage, RgbImage};

use crate::error::{Error, Result};

/// Decode any format supported by `image` into a [`DynamicImage`].
pub fn load_dynamic(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an image file and convert it to 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = load_dynamic(path)?;
    tracing::debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img.to_rgb8())
}

/// Encode an RGB image; the format follows the file extension.
pub fn save_rgb(path: &Path, img: &RgbImage) -> Result<()> {
    img.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}
