use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use lendscore_classifiers::config::PipelineConfig;

/// Training run settings: data and output paths plus the pipeline
/// configuration stored in the artifact.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct TrainConfig {
    pub train_data: String,
    pub output_file: String,
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            train_data: String::new(),
            output_file: String::from("loan_model.json"),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl TrainConfig {
    /// Build the effective config: JSON file first, then CLI overrides.
    ///
    /// A config file that exists but does not parse is an error, not a
    /// silent fallback to defaults.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                let config_json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                serde_json::from_str(&config_json)
                    .with_context(|| format!("Malformed training config: {:?}", path))?
            }
            None => TrainConfig::default(),
        };

        // Apply CLI overrides
        if let Some(train_data) = matches.get_one::<String>("train_data") {
            config.train_data = train_data.clone();
        }
        if let Some(output_file) = matches.get_one::<String>("output_file") {
            config.output_file = output_file.clone();
        }

        validate_csv_file(&config.train_data)?;
        Ok(config)
    }
}

/// Check that a training data path is set, names a CSV file, and exists.
pub fn validate_csv_file(path: &str) -> Result<()> {
    if path.is_empty() {
        anyhow::bail!(
            "No training data file given; set train_data in the config or pass --train_data"
        );
    }

    let pb = Path::new(path);
    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("csv") => {}
        _ => anyhow::bail!("File must have a .csv extension: {}", path),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}
