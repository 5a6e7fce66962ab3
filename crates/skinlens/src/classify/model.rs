//! Small convolutional network for skin-type classification.
//!
//! Shapes:
//! - input: `[N, 3, S, S]`, RGB in `0..=1`
//! - logits: `[N, 3]`, ordered as [`SkinType::ALL`](super::SkinType::ALL)

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig};
use burn::nn::{Linear, LinearConfig, PaddingConfig2d};
use burn::tensor::activation::{relu, softmax};
use burn::tensor::{backend::Backend, Tensor};

/// Number of output classes.
pub const NUM_CLASSES: usize = 3;

/// Layer widths of [`SkinTypeNet`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SkinTypeNetConfig {
    /// Output channels of the three conv blocks.
    pub channels: [usize; 3],
    /// Width of the hidden fully connected layer.
    pub hidden: usize,
}

impl Default for SkinTypeNetConfig {
    fn default() -> Self {
        Self {
            channels: [16, 32, 64],
            hidden: 64,
        }
    }
}

/// conv 3x3 (same) -> ReLU -> max-pool 2x2.
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    conv: Conv2d<B>,
    pool: MaxPool2d,
}

impl<B: Backend> ConvBlock<B> {
    fn new(in_channels: usize, out_channels: usize, device: &B::Device) -> Self {
        let conv = Conv2dConfig::new([in_channels, out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        Self { conv, pool }
    }

    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        self.pool.forward(relu(self.conv.forward(x)))
    }
}

#[derive(Module, Debug)]
pub struct SkinTypeNet<B: Backend> {
    blocks: Vec<ConvBlock<B>>,
    gap: AdaptiveAvgPool2d,
    fc1: Linear<B>,
    fc2: Linear<B>,
}

impl<B: Backend> SkinTypeNet<B> {
    /// Randomly initialised network.
    pub fn new(config: &SkinTypeNetConfig, device: &B::Device) -> Self {
        let mut in_ch = 3;
        let mut blocks = Vec::with_capacity(config.channels.len());
        for &out_ch in &config.channels {
            blocks.push(ConvBlock::new(in_ch, out_ch, device));
            in_ch = out_ch;
        }
        Self {
            blocks,
            gap: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            fc1: LinearConfig::new(in_ch, config.hidden).init(device),
            fc2: LinearConfig::new(config.hidden, NUM_CLASSES).init(device),
        }
    }

    /// Class logits `[N, 3]`.
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 2> {
        let mut x = input;
        for block in &self.blocks {
            x = block.forward(x);
        }
        let x = self.gap.forward(x).flatten::<2>(1, 3);
        let x = relu(self.fc1.forward(x));
        self.fc2.forward(x)
    }

    /// Class probabilities `[N, 3]`.
    pub fn forward_probs(&self, input: Tensor<B, 4>) -> Tensor<B, 2> {
        softmax(self.forward(input), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type B = NdArray<f32>;

    #[test]
    fn logits_have_one_row_per_image() {
        let device = Default::default();
        let model = SkinTypeNet::<B>::new(&SkinTypeNetConfig::default(), &device);
        let input = Tensor::<B, 4>::zeros([2, 3, 32, 32], &device);
        assert_eq!(model.forward(input).dims(), [2, NUM_CLASSES]);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let device = Default::default();
        let model = SkinTypeNet::<B>::new(&SkinTypeNetConfig::default(), &device);
        let input = Tensor::<B, 4>::ones([1, 3, 24, 24], &device);
        let probs = model.forward_probs(input).into_data().to_vec::<f32>().unwrap();
        assert_eq!(probs.len(), NUM_CLASSES);
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn odd_input_sizes_still_pool_to_one_vector() {
        let device = Default::default();
        let config = SkinTypeNetConfig {
            channels: [4, 8, 8],
            hidden: 8,
        };
        let model = SkinTypeNet::<B>::new(&config, &device);
        let input = Tensor::<B, 4>::zeros([1, 3, 29, 17], &device);
        assert_eq!(model.forward(input).dims(), [1, NUM_CLASSES]);
    }
}
