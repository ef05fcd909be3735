pub mod form;
pub mod input;

use std::path::PathBuf;

use anyhow::Result;

use lendscore_classifiers::artifact::Predictor;

/// Load the model once, obtain one applicant record, and print the decision.
///
/// With `--input` the record comes from a JSON file; otherwise it is
/// collected through interactive prompts.
pub fn run_prediction(model_path: &PathBuf, input_path: Option<&PathBuf>) -> Result<()> {
    let predictor = Predictor::open(model_path)?;

    let record = match input_path {
        Some(path) => input::read_record(path)?,
        None => form::prompt_record()?,
    };

    let decision = predictor.predict(&record)?;
    println!("Loan application decision: {}", decision);
    Ok(())
}
