//! Column names, value domains, and the single-applicant input record.
//!
//! The training CSV and the prediction surface share this schema. The order
//! of [`FEATURE_COLUMNS`] is the feature-vector layout the classifier is
//! trained on, so it must never change between training and inference.
use serde::{Deserialize, Serialize};

use crate::encoding::{EncodeError, EncoderSet};

/// Identifier column, dropped before training (not predictive).
pub const ID_COLUMN: &str = "Loan_ID";

/// Output label column: Y (approved) or N (rejected).
pub const LABEL_COLUMN: &str = "Loan_Status";

/// String-valued columns that get a fitted category encoder.
pub const CATEGORICAL_COLUMNS: [&str; 6] = [
    "Gender",
    "Married",
    "Dependents",
    "Education",
    "Self_Employed",
    "Property_Area",
];

/// Columns imputed with the most frequent value. Credit_History and
/// Loan_Amount_Term are numeric-typed but behave like categories, so they are
/// mode-filled rather than mean-filled.
pub const MODE_IMPUTED_COLUMNS: [&str; 8] = [
    "Gender",
    "Married",
    "Dependents",
    "Education",
    "Self_Employed",
    "Property_Area",
    "Credit_History",
    "Loan_Amount_Term",
];

/// Continuous columns imputed with the column mean.
pub const MEAN_IMPUTED_COLUMNS: [&str; 3] =
    ["ApplicantIncome", "CoapplicantIncome", "LoanAmount"];

/// Feature-vector column order used at both training and inference time.
pub const FEATURE_COLUMNS: [&str; 11] = [
    "Gender",
    "Married",
    "Dependents",
    "Education",
    "Self_Employed",
    "ApplicantIncome",
    "CoapplicantIncome",
    "LoanAmount",
    "Loan_Amount_Term",
    "Credit_History",
    "Property_Area",
];

/// Default repayment term in days when the applicant leaves it blank.
pub const DEFAULT_LOAN_TERM: f32 = 360.0;

/// Returns true when `column` is encoded through a category encoder.
pub fn is_categorical(column: &str) -> bool {
    CATEGORICAL_COLUMNS
        .iter()
        .any(|c| c.eq_ignore_ascii_case(column))
}

/// One applicant, as collected by the interactive form or a JSON input file.
///
/// Field names serialize under the training CSV header names so a record can
/// be written straight from a dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Married")]
    pub married: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    #[serde(rename = "Education")]
    pub education: String,
    #[serde(rename = "Self_Employed")]
    pub self_employed: String,
    #[serde(rename = "ApplicantIncome")]
    pub applicant_income: f32,
    #[serde(rename = "CoapplicantIncome")]
    pub coapplicant_income: f32,
    #[serde(rename = "LoanAmount")]
    pub loan_amount: f32,
    #[serde(rename = "Loan_Amount_Term", default = "default_loan_term")]
    pub loan_amount_term: f32,
    #[serde(rename = "Credit_History")]
    pub credit_history: f32,
    #[serde(rename = "Property_Area")]
    pub property_area: String,
}

fn default_loan_term() -> f32 {
    DEFAULT_LOAN_TERM
}

impl ApplicantRecord {
    /// Assemble the encoded feature vector in [`FEATURE_COLUMNS`] order.
    ///
    /// Categorical fields go through the stored encoders; a value outside the
    /// training vocabulary is rejected with an explicit error.
    pub fn feature_row(&self, encoders: &EncoderSet) -> Result<Vec<f32>, EncodeError> {
        Ok(vec![
            encoders.feature("Gender")?.encode(&self.gender)? as f32,
            encoders.feature("Married")?.encode(&self.married)? as f32,
            encoders.feature("Dependents")?.encode(&self.dependents)? as f32,
            encoders.feature("Education")?.encode(&self.education)? as f32,
            encoders.feature("Self_Employed")?.encode(&self.self_employed)? as f32,
            self.applicant_income,
            self.coapplicant_income,
            self.loan_amount,
            self.loan_amount_term,
            self.credit_history,
            encoders.feature("Property_Area")?.encode(&self.property_area)? as f32,
        ])
    }
}

/// Final prediction outcome, decoded from the label encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Map a decoded Loan_Status label to a decision. Returns `None` for any
    /// label outside the {Y, N} domain.
    pub fn from_label(label: &str) -> Option<Decision> {
        match label {
            "Y" => Some(Decision::Approved),
            "N" => Some(Decision::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Approved => write!(f, "Approved"),
            Decision::Rejected => write!(f, "Rejected"),
        }
    }
}
