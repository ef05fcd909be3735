use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use lendscore_classifiers::schema::ApplicantRecord;

/// Read one applicant record from a JSON file keyed by the training CSV
/// column names.
pub fn read_record<P: AsRef<Path>>(path: P) -> Result<ApplicantRecord> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read applicant record: {}", path.display()))?;
    let record = serde_json::from_str(&json)
        .with_context(|| format!("Malformed applicant record: {}", path.display()))?;
    Ok(record)
}
