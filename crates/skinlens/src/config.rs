//! Enhancement pipeline configuration.

use std::path::Path;

use crate::error::{Error, Result};
use crate::filters::{
    BilateralParams, BlendParams, ClaheParams, ColorGainParams, DenoiseParams, GammaParams,
    SaturationParams, WhiteBalanceParams,
};

/// Parameters for every stage of the enhancement pipeline.
///
/// Defaults reproduce the stock enhancement. JSON files may list any subset
/// of sections and fields; missing ones keep their defaults.
///
/// ```json
/// { "gamma": { "gamma": 2.2 }, "blend": { "alpha": 0.3 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub denoise: DenoiseParams,
    pub clahe: ClaheParams,
    pub gamma: GammaParams,
    pub white_balance: WhiteBalanceParams,
    pub bilateral: BilateralParams,
    pub color_gain: ColorGainParams,
    pub saturation: SaturationParams,
    pub blend: BlendParams,
}

impl EnhanceConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Check every stage's parameters, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        self.denoise.validate()?;
        self.clahe.validate()?;
        self.gamma.validate()?;
        self.white_balance.validate()?;
        self.bilateral.validate()?;
        self.color_gain.validate()?;
        self.saturation.validate()?;
        self.blend.validate()?;
        Ok(())
    }
}
