//! Image filters used by the enhancement pipeline.
//!
//! Every stage takes an 8-bit RGB image plus its parameter struct and
//! returns a new image of the same size. Stages can be called on their own;
//! [`crate::Enhancer`] chains them in the fixed order.

mod bilateral;
mod blend;
mod border;
mod clahe;
pub(crate) mod color;
mod denoise;
mod tone;
mod white_balance;

use image::RgbImage;

pub use bilateral::{bilateral, BilateralParams};
pub use blend::{blend, compose_side_by_side, BlendParams};
pub use clahe::ClaheParams;
pub use denoise::{denoise, DenoiseParams};
pub use tone::{
    apply_color_gain, apply_gamma, apply_saturation, ColorGainParams, GammaParams,
    SaturationParams,
};
pub use white_balance::{retinex_white_balance, WhiteBalanceParams};

/// CLAHE on the Lab lightness channel; chroma is left untouched.
pub fn apply_clahe(img: &RgbImage, params: &ClaheParams) -> RgbImage {
    let mut lab = color::rgb_to_lab(img);
    let l = clahe::equalize_plane(&lab.l_u8(), lab.width, lab.height, params);
    lab.set_l_u8(&l);
    color::lab_to_rgb(&lab)
}
