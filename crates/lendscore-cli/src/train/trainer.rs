use anyhow::{Context, Result};

use lendscore_classifiers::artifact::ModelArtifact;
use lendscore_classifiers::dataset::{encode_features, train_test_split, RawTable};
use lendscore_classifiers::encoding::EncoderSet;
use lendscore_classifiers::imputation::fill_missing;
use lendscore_classifiers::models::{accuracy, LoanClassifier};

use super::input::TrainConfig;

/// Run the full training pipeline: load, impute, encode, split, fit,
/// report held-out accuracy, and save the artifact.
pub fn run_training(config: &TrainConfig) -> Result<()> {
    let mut table = RawTable::from_csv_path(&config.train_data)
        .context("Failed to load training data")?;
    log::info!(
        "Loaded {} applications from {}",
        table.n_rows(),
        config.train_data
    );

    let filled = fill_missing(&mut table)?;
    log::info!("Imputed {} missing cells", filled);

    let encoders = EncoderSet::fit(&table)?;
    let data = encode_features(&table, &encoders)?;

    let split = train_test_split(
        data.n_rows(),
        config.pipeline.split.test_fraction,
        config.pipeline.split.seed,
    )?;
    let train = data.select(&split.train);
    log::info!(
        "Training on {} rows, holding out {}",
        split.train.len(),
        split.test.len()
    );

    let model = LoanClassifier::fit(&train, &config.pipeline.model)?;

    if split.test.is_empty() {
        log::warn!("Held-out set is empty; skipping the accuracy check");
    } else {
        let test = data.select(&split.test);
        let predicted = model.predict_codes(&test.x);
        let acc = accuracy(&predicted, &test.y);
        log::info!(
            "Held-out accuracy: {:.1}% ({} rows)",
            100.0 * acc,
            split.test.len()
        );
    }

    let artifact = ModelArtifact {
        model,
        encoders,
        config: config.pipeline.clone(),
    };
    artifact
        .save(&config.output_file)
        .context("Failed to save model artifact")?;
    log::info!("Saved model artifact to {}", config.output_file);

    Ok(())
}
