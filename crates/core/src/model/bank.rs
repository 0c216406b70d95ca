use thiserror::Error;

use super::question::{QuestionDraft, QuestionError, QuestionRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank must contain at least one question")]
    Empty,

    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// The static, ordered set of questions a quiz is played from.
///
/// Never empty. Sessions only ever read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::Empty` if `questions` is empty.
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    /// Validate every draft and build the bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidQuestion` for the first draft that fails
    /// validation, or `BankError::Empty` if there are none.
    pub fn from_drafts(drafts: impl IntoIterator<Item = QuestionDraft>) -> Result<Self, BankError> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| BankError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
