//! Training CSV loading and the encoded design matrix.
//!
//! A [`RawTable`] is the CSV as read: string cells, column-major, with empty
//! cells kept as `None` so imputation can find them. [`LoanData`] is the
//! numeric form the classifier consumes, produced by running the raw columns
//! through the fitted encoders in [`FEATURE_COLUMNS`] order.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::encoding::EncoderSet;
use crate::schema::{is_categorical, FEATURE_COLUMNS, LABEL_COLUMN};

/// Column-major string table with explicit missing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Read a headered CSV file. Cells that are empty after trimming are
    /// recorded as missing.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<RawTable> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open training data file: {}", path.display()))?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header from {}", path.display()))?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();
        if headers.is_empty() {
            bail!("CSV file {} has no header row", path.display());
        }

        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for (row_idx, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("Failed to parse CSV record {}", row_idx + 1))?;
            if record.len() != headers.len() {
                bail!(
                    "CSV record {} has {} fields, expected {}",
                    row_idx + 1,
                    record.len(),
                    headers.len()
                );
            }
            for (col_idx, cell) in record.iter().enumerate() {
                let cell = cell.trim();
                columns[col_idx].push(if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_owned())
                });
            }
        }

        Ok(RawTable { headers, columns })
    }

    /// Build a table directly from columns. All columns must have the same
    /// length.
    pub fn from_columns(
        headers: Vec<String>,
        columns: Vec<Vec<Option<String>>>,
    ) -> Result<RawTable> {
        if headers.len() != columns.len() {
            bail!(
                "{} headers but {} columns",
                headers.len(),
                columns.len()
            );
        }
        if let Some(first) = columns.first() {
            for (idx, column) in columns.iter().enumerate() {
                if column.len() != first.len() {
                    bail!(
                        "column '{}' has {} rows, expected {}",
                        headers[idx],
                        column.len(),
                        first.len()
                    );
                }
            }
        }
        Ok(RawTable { headers, columns })
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Column headers in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    /// Cells of a column, looked up case-insensitively by header name.
    pub fn column(&self, name: &str) -> Result<&[Option<String>]> {
        let idx = self
            .column_index(name)
            .with_context(|| format!("Column '{}' not found in training data", name))?;
        Ok(&self.columns[idx])
    }

    /// Mutable cells of a column, for imputation.
    pub fn column_mut(&mut self, name: &str) -> Result<&mut Vec<Option<String>>> {
        let idx = self
            .column_index(name)
            .with_context(|| format!("Column '{}' not found in training data", name))?;
        Ok(&mut self.columns[idx])
    }
}

/// Encoded design matrix plus label codes, ready for training.
#[derive(Debug, Clone)]
pub struct LoanData {
    pub x: Array2<f32>,
    pub y: Vec<u32>,
    pub feature_names: Vec<String>,
}

impl LoanData {
    /// Rows selected by index, preserving order.
    pub fn select(&self, indices: &[usize]) -> LoanData {
        LoanData {
            x: self.x.select(Axis(0), indices),
            y: indices.iter().map(|&i| self.y[i]).collect(),
            feature_names: self.feature_names.clone(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.x.nrows()
    }
}

/// Encode an imputed raw table into the numeric matrix the classifier
/// trains on, columns in [`FEATURE_COLUMNS`] order.
pub fn encode_features(table: &RawTable, encoders: &EncoderSet) -> Result<LoanData> {
    let n_rows = table.n_rows();
    let n_cols = FEATURE_COLUMNS.len();

    let mut flat = Vec::with_capacity(n_rows * n_cols);
    let mut encoded_columns = Vec::with_capacity(n_cols);
    for column in FEATURE_COLUMNS {
        let cells = table.column(column)?;
        let mut values = Vec::with_capacity(n_rows);
        if is_categorical(column) {
            let encoder = encoders.feature(column)?;
            for (row, cell) in cells.iter().enumerate() {
                let cell = require_cell(cell, column, row)?;
                let code = encoder.encode(cell).with_context(|| {
                    format!("Failed to encode column '{}' at row {}", column, row)
                })?;
                values.push(code as f32);
            }
        } else {
            for (row, cell) in cells.iter().enumerate() {
                let cell = require_cell(cell, column, row)?;
                let parsed: f32 = cell.parse().with_context(|| {
                    format!(
                        "Invalid numeric value '{}' in column '{}' at row {}",
                        cell, column, row
                    )
                })?;
                values.push(parsed);
            }
        }
        encoded_columns.push(values);
    }
    for row in 0..n_rows {
        for column in &encoded_columns {
            flat.push(column[row]);
        }
    }

    let label_cells = table.column(LABEL_COLUMN)?;
    let label_encoder = encoders.label();
    let mut y = Vec::with_capacity(n_rows);
    for (row, cell) in label_cells.iter().enumerate() {
        let cell = require_cell(cell, LABEL_COLUMN, row)?;
        let code = label_encoder
            .encode(cell)
            .with_context(|| format!("Failed to encode label at row {}", row))?;
        y.push(code);
    }

    let x = Array2::from_shape_vec((n_rows, n_cols), flat)
        .context("Feature matrix shape mismatch")?;
    Ok(LoanData {
        x,
        y,
        feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
    })
}

fn require_cell<'a>(cell: &'a Option<String>, column: &str, row: usize) -> Result<&'a str> {
    cell.as_deref().with_context(|| {
        format!(
            "Column '{}' has a missing value at row {} after imputation",
            column, row
        )
    })
}

/// Row indices of a shuffled train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split `n_rows` row indices into train and test sets.
///
/// Rows are shuffled with a seeded RNG so the same seed always produces the
/// same split. The test set takes `test_fraction` of the rows, rounded to
/// the nearest whole row.
pub fn train_test_split(n_rows: usize, test_fraction: f64, seed: u64) -> Result<SplitIndices> {
    if !(0.0..1.0).contains(&test_fraction) {
        bail!(
            "test fraction must be in [0, 1), got {}",
            test_fraction
        );
    }
    if n_rows == 0 {
        bail!("cannot split an empty dataset");
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_fraction).round() as usize;
    let test = indices.split_off(n_rows - n_test);
    Ok(SplitIndices {
        train: indices,
        test,
    })
}
