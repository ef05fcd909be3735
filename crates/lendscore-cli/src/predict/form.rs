//! Interactive applicant entry.
//!
//! Prompts run over any `BufRead`/`Write` pair so the flow is testable
//! without a terminal. Choice answers are matched case-insensitively and
//! stored in their canonical spelling, since the encoders only know the
//! spellings seen in the training data.

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

use lendscore_classifiers::schema::{ApplicantRecord, DEFAULT_LOAN_TERM};

const GENDER_CHOICES: [&str; 2] = ["Male", "Female"];
const YES_NO_CHOICES: [&str; 2] = ["Yes", "No"];
const DEPENDENTS_CHOICES: [&str; 4] = ["0", "1", "2", "3+"];
const EDUCATION_CHOICES: [&str; 2] = ["Graduate", "Not Graduate"];
const CREDIT_HISTORY_CHOICES: [&str; 2] = ["1", "0"];
const PROPERTY_AREA_CHOICES: [&str; 3] = ["Urban", "Semiurban", "Rural"];

/// Collect a full applicant record from the terminal.
pub fn prompt_record() -> Result<ApplicantRecord> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    collect_record(&mut stdin.lock(), &mut stdout.lock())
}

/// Prompt for every applicant field, in the same order as the feature
/// vector.
pub fn collect_record<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> Result<ApplicantRecord> {
    writeln!(out, "Enter the applicant's details.")?;

    let gender = prompt_choice(reader, out, "Gender", &GENDER_CHOICES)?;
    let married = prompt_choice(reader, out, "Married", &YES_NO_CHOICES)?;
    let dependents = prompt_choice(reader, out, "Dependents", &DEPENDENTS_CHOICES)?;
    let education = prompt_choice(reader, out, "Education", &EDUCATION_CHOICES)?;
    let self_employed = prompt_choice(reader, out, "Self employed", &YES_NO_CHOICES)?;
    let applicant_income = prompt_number(reader, out, "Applicant monthly income", None)?;
    let coapplicant_income = prompt_number(reader, out, "Coapplicant monthly income", None)?;
    let loan_amount = prompt_number(reader, out, "Loan amount (in thousands)", None)?;
    let loan_amount_term =
        prompt_number(reader, out, "Loan term in days", Some(DEFAULT_LOAN_TERM))?;
    let credit_history =
        prompt_choice(reader, out, "Credit history meets guidelines", &CREDIT_HISTORY_CHOICES)?
            .parse::<f32>()
            .context("Credit history choice is not numeric")?;
    let property_area = prompt_choice(reader, out, "Property area", &PROPERTY_AREA_CHOICES)?;

    Ok(ApplicantRecord {
        gender,
        married,
        dependents,
        education,
        self_employed,
        applicant_income,
        coapplicant_income,
        loan_amount,
        loan_amount_term,
        credit_history,
        property_area,
    })
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line).context("Failed to read input")?;
    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Ask until the answer matches one of `choices`, case-insensitively.
/// Returns the canonical spelling of the matched choice.
fn prompt_choice<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    label: &str,
    choices: &[&str],
) -> Result<String> {
    loop {
        write!(out, "{} [{}]: ", label, choices.join("/"))?;
        out.flush()?;
        let Some(line) = read_line(reader)? else {
            bail!("Input closed before '{}' was answered", label);
        };
        let answer = line.trim();
        if let Some(canonical) = choices.iter().find(|c| c.eq_ignore_ascii_case(answer)) {
            return Ok((*canonical).to_owned());
        }
        writeln!(out, "Please answer one of: {}", choices.join(", "))?;
    }
}

/// Ask until the answer parses as a non-negative finite number. An empty
/// answer takes `default` when one is given.
fn prompt_number<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    label: &str,
    default: Option<f32>,
) -> Result<f32> {
    loop {
        match default {
            Some(d) => write!(out, "{} [default {}]: ", label, d)?,
            None => write!(out, "{}: ", label)?,
        }
        out.flush()?;
        let Some(line) = read_line(reader)? else {
            bail!("Input closed before '{}' was answered", label);
        };
        let answer = line.trim();
        if answer.is_empty() {
            if let Some(d) = default {
                return Ok(d);
            }
            writeln!(out, "A value is required.")?;
            continue;
        }
        match answer.parse::<f32>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(v),
            _ => writeln!(out, "Please enter a non-negative number.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str) -> Result<ApplicantRecord> {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        collect_record(&mut reader, &mut out)
    }

    #[test]
    fn full_form_builds_a_record() {
        let record =
            collect("Male\nYes\n2\nGraduate\nNo\n5000\n1500\n120\n360\n1\nSemiurban\n").unwrap();
        assert_eq!(record.gender, "Male");
        assert_eq!(record.dependents, "2");
        assert_eq!(record.applicant_income, 5000.0);
        assert_eq!(record.credit_history, 1.0);
        assert_eq!(record.property_area, "Semiurban");
    }

    #[test]
    fn choice_answers_are_case_insensitive() {
        let record =
            collect("male\nyes\n3+\ngraduate\nno\n5000\n0\n100\n360\n0\nurban\n").unwrap();
        assert_eq!(record.gender, "Male");
        assert_eq!(record.married, "Yes");
        assert_eq!(record.property_area, "Urban");
        assert_eq!(record.credit_history, 0.0);
    }

    #[test]
    fn invalid_choice_reprompts() {
        let record =
            collect("Other\nMale\nYes\n0\nGraduate\nNo\n5000\n0\n100\n360\n1\nUrban\n").unwrap();
        assert_eq!(record.gender, "Male");
    }

    #[test]
    fn empty_loan_term_takes_the_default() {
        let record = collect("Male\nYes\n0\nGraduate\nNo\n5000\n0\n100\n\n1\nUrban\n").unwrap();
        assert_eq!(record.loan_amount_term, DEFAULT_LOAN_TERM);
    }

    #[test]
    fn negative_number_reprompts() {
        let record =
            collect("Male\nYes\n0\nGraduate\nNo\n-5\n5000\n0\n100\n360\n1\nUrban\n").unwrap();
        assert_eq!(record.applicant_income, 5000.0);
    }

    #[test]
    fn eof_mid_form_is_an_error() {
        assert!(collect("Male\nYes\n").is_err());
    }
}
