use std::path::Path;

use quiz_core::model::{QuestionBank, QuestionDraft};
use tracing::debug;

use crate::error::BankLoadError;

const BUILTIN_BANK: &str = include_str!("../data/quiz_data.json");

/// Parse a JSON array of `{question, options, correctAnswer}` records.
///
/// # Errors
///
/// Returns `BankLoadError::Json` for malformed JSON and
/// `BankLoadError::Bank` for an empty bank or an invalid record.
pub fn load_bank_from_str(json: &str) -> Result<QuestionBank, BankLoadError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(json)?;
    let bank = QuestionBank::from_drafts(drafts)?;
    debug!(questions = bank.len(), "question bank parsed");
    Ok(bank)
}

/// Read and parse a question bank file.
///
/// # Errors
///
/// Returns `BankLoadError::Io` if the file cannot be read, otherwise the
/// same errors as [`load_bank_from_str`].
pub fn load_bank_from_path(path: impl AsRef<Path>) -> Result<QuestionBank, BankLoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| BankLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_bank_from_str(&json)
}

/// The question bank bundled with the crate.
///
/// # Errors
///
/// Only fails if the bundled data is broken.
pub fn builtin_bank() -> Result<QuestionBank, BankLoadError> {
    load_bank_from_str(BUILTIN_BANK)
}
