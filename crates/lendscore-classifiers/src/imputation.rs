//! Missing-value imputation over the raw string table.
//!
//! Categorical-like columns are filled with their most frequent value,
//! continuous columns with the column mean. Imputation runs before encoder
//! fitting, so every cell the encoders see is present.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;

use crate::dataset::RawTable;
use crate::schema::{MEAN_IMPUTED_COLUMNS, MODE_IMPUTED_COLUMNS};

/// Fill every missing cell in the imputed columns, returning the number of
/// cells that were filled.
///
/// Ties between equally frequent values resolve to the lexicographically
/// smallest value, so the fill is deterministic.
pub fn fill_missing(table: &mut RawTable) -> Result<usize> {
    let mut filled = 0;
    for column in MODE_IMPUTED_COLUMNS {
        filled += fill_with_mode(table, column)?;
    }
    for column in MEAN_IMPUTED_COLUMNS {
        filled += fill_with_mean(table, column)?;
    }
    Ok(filled)
}

fn fill_with_mode(table: &mut RawTable, column: &str) -> Result<usize> {
    let cells = table.column_mut(column)?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for cell in cells.iter().flatten() {
        *counts.entry(cell.as_str()).or_insert(0) += 1;
    }
    // Ascending key order plus a strict comparison keeps the smallest of
    // any tied values.
    let mut mode: Option<(&str, usize)> = None;
    for (value, count) in counts {
        match mode {
            Some((_, best)) if count <= best => {}
            _ => mode = Some((value, count)),
        }
    }
    let Some((mode, _)) = mode else {
        bail!("column '{}' has no values to impute from", column);
    };
    let mode = mode.to_owned();

    let mut filled = 0;
    for cell in cells.iter_mut() {
        if cell.is_none() {
            *cell = Some(mode.clone());
            filled += 1;
        }
    }
    if filled > 0 {
        log::debug!(
            "Imputed {} missing cells in '{}' with mode '{}'",
            filled,
            column,
            mode
        );
    }
    Ok(filled)
}

fn fill_with_mean(table: &mut RawTable, column: &str) -> Result<usize> {
    let cells = table.column_mut(column)?;

    let mut sum = 0.0f64;
    let mut n = 0usize;
    for cell in cells.iter().flatten() {
        let value: f64 = cell.parse().with_context(|| {
            format!("Invalid numeric value '{}' in column '{}'", cell, column)
        })?;
        sum += value;
        n += 1;
    }
    if n == 0 {
        bail!("column '{}' has no values to impute from", column);
    }
    let mean = (sum / n as f64) as f32;
    let mean_cell = mean.to_string();

    let mut filled = 0;
    for cell in cells.iter_mut() {
        if cell.is_none() {
            *cell = Some(mean_cell.clone());
            filled += 1;
        }
    }
    if filled > 0 {
        log::debug!(
            "Imputed {} missing cells in '{}' with mean {}",
            filled,
            column,
            mean
        );
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(column: &str, cells: Vec<Option<String>>) -> RawTable {
        RawTable::from_columns(vec![column.to_owned()], vec![cells]).unwrap()
    }

    #[test]
    fn mode_fill_uses_most_frequent_value() {
        let mut table = table_with(
            "Gender",
            vec![
                Some("Male".into()),
                Some("Male".into()),
                Some("Female".into()),
                None,
            ],
        );
        let filled = fill_with_mode(&mut table, "Gender").unwrap();
        assert_eq!(filled, 1);
        assert_eq!(table.column("Gender").unwrap()[3].as_deref(), Some("Male"));
    }

    #[test]
    fn mode_tie_resolves_to_smallest_value() {
        let mut table = table_with(
            "Dependents",
            vec![Some("2".into()), Some("0".into()), None],
        );
        fill_with_mode(&mut table, "Dependents").unwrap();
        assert_eq!(
            table.column("Dependents").unwrap()[2].as_deref(),
            Some("0")
        );
    }

    #[test]
    fn mean_fill_uses_column_mean() {
        let mut table = table_with(
            "LoanAmount",
            vec![Some("100".into()), Some("200".into()), None],
        );
        let filled = fill_with_mean(&mut table, "LoanAmount").unwrap();
        assert_eq!(filled, 1);
        assert_eq!(
            table.column("LoanAmount").unwrap()[2].as_deref(),
            Some("150")
        );
    }

    #[test]
    fn fully_missing_column_is_an_error() {
        let mut table = table_with("LoanAmount", vec![None, None]);
        assert!(fill_with_mean(&mut table, "LoanAmount").is_err());
    }

    #[test]
    fn non_numeric_cell_in_mean_column_is_an_error() {
        let mut table = table_with("LoanAmount", vec![Some("abc".into()), None]);
        assert!(fill_with_mean(&mut table, "LoanAmount").is_err());
    }
}
