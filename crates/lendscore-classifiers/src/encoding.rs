//! Per-column category encoders.
//!
//! Each string-valued column gets a [`CategoryEncoder`]: a sorted vocabulary
//! fitted on the training data, mapping category strings to dense integer
//! codes and back. The fitted set is serialized into the model artifact so
//! inference always encodes with the exact vocabularies the model was
//! trained on.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::RawTable;
use crate::schema::{CATEGORICAL_COLUMNS, LABEL_COLUMN};

/// Encoding failure at fit or transform time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The value was never seen during fitting.
    UnknownCategory { column: String, value: String },
    /// The code does not index into the fitted vocabulary.
    CodeOutOfRange { column: String, code: u32 },
    /// No encoder was fitted for the requested column.
    MissingEncoder { column: String },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodeError::UnknownCategory { column, value } => write!(
                f,
                "value '{}' in column '{}' was not seen during training",
                value, column
            ),
            EncodeError::CodeOutOfRange { column, code } => write!(
                f,
                "code {} is outside the fitted vocabulary of column '{}'",
                code, column
            ),
            EncodeError::MissingEncoder { column } => {
                write!(f, "no fitted encoder for column '{}'", column)
            }
        }
    }
}

impl Error for EncodeError {}

/// Fitted category-to-code bijection for one column.
///
/// The vocabulary is stored sorted, so codes are assigned in lexicographic
/// order of the category strings and encoding is a binary search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    column: String,
    classes: Vec<String>,
}

impl CategoryEncoder {
    /// Fit an encoder over the distinct values of a column. Values are
    /// deduplicated and sorted; missing cells must be imputed beforehand.
    pub fn fit<'a, I>(column: &str, values: I) -> CategoryEncoder
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(str::to_owned).collect();
        classes.sort_unstable();
        classes.dedup();
        CategoryEncoder {
            column: column.to_owned(),
            classes,
        }
    }

    /// Column this encoder was fitted on.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Number of distinct categories in the fitted vocabulary.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Map a category string to its code.
    pub fn encode(&self, value: &str) -> Result<u32, EncodeError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .map(|idx| idx as u32)
            .map_err(|_| EncodeError::UnknownCategory {
                column: self.column.clone(),
                value: value.to_owned(),
            })
    }

    /// Map a code back to its category string.
    pub fn decode(&self, code: u32) -> Result<&str, EncodeError> {
        self.classes
            .get(code as usize)
            .map(String::as_str)
            .ok_or(EncodeError::CodeOutOfRange {
                column: self.column.clone(),
                code,
            })
    }
}

/// The full set of encoders fitted during training: one per categorical
/// feature column plus one for the label column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderSet {
    features: Vec<CategoryEncoder>,
    label: CategoryEncoder,
}

impl EncoderSet {
    /// Fit all encoders from an imputed raw table.
    ///
    /// Fails if a categorical column or the label column is absent, or if
    /// any cell is still missing after imputation.
    pub fn fit(table: &RawTable) -> anyhow::Result<EncoderSet> {
        let mut features = Vec::with_capacity(CATEGORICAL_COLUMNS.len());
        for column in CATEGORICAL_COLUMNS {
            features.push(fit_column(table, column)?);
        }
        let label = fit_column(table, LABEL_COLUMN)?;
        Ok(EncoderSet { features, label })
    }

    /// Look up the encoder for a categorical feature column.
    pub fn feature(&self, column: &str) -> Result<&CategoryEncoder, EncodeError> {
        self.features
            .iter()
            .find(|e| e.column.eq_ignore_ascii_case(column))
            .ok_or_else(|| EncodeError::MissingEncoder {
                column: column.to_owned(),
            })
    }

    /// Encoder for the Loan_Status label column.
    pub fn label(&self) -> &CategoryEncoder {
        &self.label
    }
}

fn fit_column(table: &RawTable, column: &str) -> anyhow::Result<CategoryEncoder> {
    let values = table.column(column)?;
    let mut present = Vec::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        match value {
            Some(v) => present.push(v.as_str()),
            None => anyhow::bail!(
                "column '{}' has a missing value at row {} after imputation",
                column,
                row
            ),
        }
    }
    Ok(CategoryEncoder::fit(column, present))
}
