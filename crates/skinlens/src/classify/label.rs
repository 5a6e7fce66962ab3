//! Skin-type labels in model output order.

use std::fmt;
use std::str::FromStr;

/// Skin type predicted by the classifier.
///
/// Variant order matches the model's output logits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    Dry,
    Normal,
    Oily,
}

impl SkinType {
    /// All labels in logit order.
    pub const ALL: [SkinType; 3] = [SkinType::Dry, SkinType::Normal, SkinType::Oily];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            SkinType::Dry => 0,
            SkinType::Normal => 1,
            SkinType::Oily => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkinType::Dry => "dry",
            SkinType::Normal => "normal",
            SkinType::Oily => "oily",
        }
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown skin type '{s}' (expected dry, normal or oily)"))
    }
}
