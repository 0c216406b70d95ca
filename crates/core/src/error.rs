use thiserror::Error;

use crate::model::{BankError, QuestionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionBank, QuestionRecord};

    fn build_bank(correct: usize) -> Result<QuestionBank, Error> {
        let question = QuestionRecord::new("A?", ["x", "y"], correct)?;
        Ok(QuestionBank::new(vec![question])?)
    }

    #[test]
    fn question_errors_convert() {
        let err = build_bank(4).unwrap_err();
        assert!(matches!(
            err,
            Error::Question(QuestionError::CorrectIndexOutOfRange { index: 4, len: 2 })
        ));
        assert_eq!(err.to_string(), "correct answer 4 is out of range for 2 options");
    }

    #[test]
    fn bank_errors_convert() {
        let err: Error = QuestionBank::new(Vec::new()).unwrap_err().into();
        assert!(matches!(err, Error::Bank(BankError::Empty)));
        assert!(build_bank(1).is_ok());
    }
}
