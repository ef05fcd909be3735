//! Gradient-boosted decision-tree classifier over encoded applicant rows.

use anyhow::{bail, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::dataset::LoanData;

/// Binary log-loss trains on {-1, +1} targets; label code 1 maps to +1.
const POSITIVE_TARGET: f32 = 1.0;
const NEGATIVE_TARGET: f32 = -1.0;

/// Fitted tree ensemble. Serializes into the model artifact together with
/// the encoders it was trained against.
#[derive(Serialize, Deserialize)]
pub struct LoanClassifier {
    model: GBDT,
}

impl LoanClassifier {
    /// Fit an ensemble on encoded training rows.
    ///
    /// Labels must be binary codes in {0, 1}; code 1 becomes the positive
    /// class whose probability [`predict_proba`](Self::predict_proba)
    /// reports.
    pub fn fit(data: &LoanData, config: &ModelConfig) -> Result<LoanClassifier> {
        if data.n_rows() == 0 {
            bail!("cannot train on an empty dataset");
        }
        if data.y.len() != data.n_rows() {
            bail!(
                "{} labels for {} rows",
                data.y.len(),
                data.n_rows()
            );
        }
        if let Some(&bad) = data.y.iter().find(|&&code| code > 1) {
            bail!("label code {} is not binary; expected 0 or 1", bad);
        }

        let mut gbdt_config = Config::new();
        gbdt_config.set_feature_size(data.x.ncols());
        gbdt_config.set_shrinkage(config.learning_rate);
        gbdt_config.set_max_depth(config.max_depth);
        gbdt_config.set_iterations(config.num_trees);
        gbdt_config.set_data_sample_ratio(config.data_sample_ratio);
        gbdt_config.set_feature_sample_ratio(config.feature_sample_ratio);
        gbdt_config.set_training_optimization_level(2);
        gbdt_config.set_loss("LogLikelyhood");

        let mut model = GBDT::new(&gbdt_config);

        let mut train_rows = DataVec::with_capacity(data.n_rows());
        for (row, &code) in data.y.iter().enumerate() {
            let features = data.x.row(row).to_vec();
            let target = if code == 1 {
                POSITIVE_TARGET
            } else {
                NEGATIVE_TARGET
            };
            train_rows.push(Data::new_training_data(features, 1.0, target, None));
        }

        model.fit(&mut train_rows);
        Ok(LoanClassifier { model })
    }

    /// Per-row probability of the positive class (label code 1).
    pub fn predict_proba(&self, x: &Array2<f32>) -> Vec<f32> {
        let mut test_rows = DataVec::with_capacity(x.nrows());
        for row in 0..x.nrows() {
            test_rows.push(Data::new_test_data(x.row(row).to_vec(), None));
        }
        self.model.predict(&test_rows)
    }

    /// Per-row predicted label code, thresholding the probability at 0.5.
    pub fn predict_codes(&self, x: &Array2<f32>) -> Vec<u32> {
        self.predict_proba(x)
            .into_iter()
            .map(|p| u32::from(p >= 0.5))
            .collect()
    }
}

/// Fraction of predictions matching the actual label codes.
pub fn accuracy(predicted: &[u32], actual: &[u32]) -> f32 {
    if predicted.is_empty() || predicted.len() != actual.len() {
        return 0.0;
    }
    let hits = predicted
        .iter()
        .zip(actual)
        .filter(|(p, a)| p == a)
        .count();
    hits as f32 / predicted.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data(n_per_class: usize) -> LoanData {
        let mut flat = Vec::new();
        let mut y = Vec::new();
        for i in 0..n_per_class {
            let jitter = (i % 5) as f32;
            flat.extend([1.0, 5000.0 + 100.0 * jitter, 1.0]);
            y.push(1);
            flat.extend([0.0, 2000.0 + 100.0 * jitter, 0.0]);
            y.push(0);
        }
        LoanData {
            x: Array2::from_shape_vec((2 * n_per_class, 3), flat).unwrap(),
            y,
            feature_names: vec!["a".into(), "b".into(), "c".into()],
        }
    }

    #[test]
    fn learns_a_separable_signal() {
        let data = separable_data(12);
        let config = ModelConfig {
            num_trees: 20,
            ..ModelConfig::default()
        };
        let model = LoanClassifier::fit(&data, &config).unwrap();
        let codes = model.predict_codes(&data.x);
        assert_eq!(codes, data.y);
    }

    #[test]
    fn probabilities_stay_in_unit_interval() {
        let data = separable_data(12);
        let model = LoanClassifier::fit(&data, &ModelConfig::default()).unwrap();
        for p in model.predict_proba(&data.x) {
            assert!((0.0..=1.0).contains(&p), "probability {} out of range", p);
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let data = LoanData {
            x: Array2::zeros((0, 3)),
            y: vec![],
            feature_names: vec!["a".into(), "b".into(), "c".into()],
        };
        assert!(LoanClassifier::fit(&data, &ModelConfig::default()).is_err());
    }

    #[test]
    fn non_binary_labels_are_rejected() {
        let mut data = separable_data(2);
        data.y[0] = 3;
        assert!(LoanClassifier::fit(&data, &ModelConfig::default()).is_err());
    }

    #[test]
    fn accuracy_counts_matches() {
        assert_eq!(accuracy(&[1, 0, 1, 1], &[1, 0, 0, 1]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }
}
