//! lendscore-classifiers: tabular loan-approval training and prediction.
//!
//! This crate provides the full pipeline behind the `lendscore` CLI: the
//! applicant schema, per-column category encoders, missing-value imputation,
//! CSV dataset loading, a GBDT model wrapper, and the serialized artifact that
//! hands a fitted model (plus its encoders) from training to prediction.
//!
//! The design favors small, testable modules. The one contract worth
//! preserving exactly is encode -> predict -> decode: the encoders fitted at
//! training time are the only encoders ever applied at inference time.
pub mod artifact;
pub mod config;
pub mod dataset;
pub mod encoding;
pub mod imputation;
pub mod models;
pub mod schema;
