//! High-level enhancement API.
//!
//! [`Enhancer`] wraps an [`EnhanceConfig`] and runs the fixed stage order:
//! denoise, CLAHE, gamma, white balance, bilateral, color gain, saturation,
//! then blends the result with the input.

use image::RgbImage;

use crate::config::EnhanceConfig;
use crate::error::Result;
use crate::filters;

/// Every intermediate image of one enhancement run, in pipeline order.
#[derive(Debug, Clone)]
pub struct EnhanceStages {
    pub denoised: RgbImage,
    pub clahe: RgbImage,
    pub gamma: RgbImage,
    pub white_balanced: RgbImage,
    pub bilateral: RgbImage,
    pub color_gain: RgbImage,
    pub saturated: RgbImage,
    /// Final output: `saturated` mixed with the input.
    pub blended: RgbImage,
}

impl EnhanceStages {
    /// Stage images with stable, file-name friendly labels.
    pub fn named(&self) -> [(&'static str, &RgbImage); 8] {
        [
            ("01_denoised", &self.denoised),
            ("02_clahe", &self.clahe),
            ("03_gamma", &self.gamma),
            ("04_white_balance", &self.white_balanced),
            ("05_bilateral", &self.bilateral),
            ("06_color_gain", &self.color_gain),
            ("07_saturation", &self.saturated),
            ("08_blended", &self.blended),
        ]
    }
}

/// Photo enhancement pipeline.
///
/// Create once, enhance many images.
///
/// # Examples
///
/// ```no_run
/// use skinlens::Enhancer;
///
/// let enhancer = Enhancer::new();
/// let image = skinlens::load_rgb("face.jpg".as_ref())?;
/// let enhanced = enhancer.enhance(&image);
/// skinlens::save_rgb("face_enhanced.png".as_ref(), &enhanced)?;
/// # Ok::<(), skinlens::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Enhancer {
    config: EnhanceConfig,
}

impl Enhancer {
    /// Enhancer with the stock parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control. Fails if any parameter is out of range.
    pub fn with_config(config: EnhanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    /// Mutable access for post-construction tuning. Values are not re-validated.
    pub fn config_mut(&mut self) -> &mut EnhanceConfig {
        &mut self.config
    }

    /// Enhance an image, returning only the final blended result.
    pub fn enhance(&self, image: &RgbImage) -> RgbImage {
        self.enhance_with_stages(image).blended
    }

    /// Enhance an image and keep every intermediate stage.
    pub fn enhance_with_stages(&self, image: &RgbImage) -> EnhanceStages {
        let cfg = &self.config;
        let (w, h) = image.dimensions();
        tracing::info!(width = w, height = h, "enhancing image");

        let denoised = timed("denoise", || filters::denoise(image, &cfg.denoise));
        let clahe = timed("clahe", || filters::apply_clahe(&denoised, &cfg.clahe));
        let gamma = timed("gamma", || filters::apply_gamma(&clahe, &cfg.gamma));
        let white_balanced = timed("white_balance", || {
            filters::retinex_white_balance(&gamma, &cfg.white_balance)
        });
        let bilateral = timed("bilateral", || {
            filters::bilateral(&white_balanced, &cfg.bilateral)
        });
        let color_gain = timed("color_gain", || {
            filters::apply_color_gain(&bilateral, &cfg.color_gain)
        });
        let saturated = timed("saturation", || {
            filters::apply_saturation(&color_gain, &cfg.saturation)
        });
        let blended = timed("blend", || filters::blend(image, &saturated, &cfg.blend));

        EnhanceStages {
            denoised,
            clahe,
            gamma,
            white_balanced,
            bilateral,
            color_gain,
            saturated,
            blended,
        }
    }
}

fn timed<T>(stage: &'static str, f: impl FnOnce() -> T) -> T {
    let t0 = std::time::Instant::now();
    let out = f();
    tracing::debug!(stage, elapsed_ms = t0.elapsed().as_secs_f64() * 1e3, "stage done");
    out
}
