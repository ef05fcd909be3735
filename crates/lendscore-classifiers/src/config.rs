//! Hyper-parameter and split configuration.
//!
//! The full [`PipelineConfig`] is stored inside the trained artifact, so a
//! saved model always carries the exact settings it was trained with.

use serde::{Deserialize, Serialize};

/// Tree-ensemble hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub learning_rate: f32,
    pub max_depth: u32,
    pub num_trees: usize,
    /// Fraction of training rows each tree samples. 1.0 disables sampling
    /// and keeps training deterministic.
    pub data_sample_ratio: f64,
    /// Fraction of feature columns each tree considers.
    pub feature_sample_ratio: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_depth: 4,
            num_trees: 100,
            data_sample_ratio: 1.0,
            feature_sample_ratio: 1.0,
        }
    }
}

/// Train/test split parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of rows held out for the accuracy check.
    pub test_fraction: f64,
    /// RNG seed for the shuffle, so a rerun reproduces the same split.
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 1,
        }
    }
}

/// Everything the training run needs beyond the data itself.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub model: ModelConfig,
    pub split: SplitConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"model": {"num_trees": 10}}"#).unwrap();
        assert_eq!(config.model.num_trees, 10);
        assert_eq!(config.model.max_depth, ModelConfig::default().max_depth);
        assert_eq!(config.split, SplitConfig::default());
    }
}
