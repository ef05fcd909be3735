//! Model wrappers around the tree-ensemble backend.
pub mod gbdt;

pub use gbdt::{accuracy, LoanClassifier};
