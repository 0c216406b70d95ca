use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest number of answer options a question may carry.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text must not be empty")]
    EmptyQuestion,

    #[error("a question needs at least 2 options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} must not be empty")]
    EmptyOption { index: usize },

    #[error("correct answer {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

/// Unvalidated question as it appears in a bank file.
///
/// Field names follow the external record format:
/// `{ "question": ..., "options": [...], "correctAnswer": n }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: usize,
    ) -> Self {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer,
        }
    }

    /// Validate the draft into a `QuestionRecord`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, there are fewer than
    /// two options, an option is blank, or the correct answer is out of range.
    pub fn validate(self) -> Result<QuestionRecord, QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }

        let len = self.options.len();
        if len < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions { len });
        }

        if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }

        if self.correct_answer >= len {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_answer,
                len,
            });
        }

        Ok(QuestionRecord {
            question: self.question,
            options: self.options,
            correct_index: self.correct_answer,
        })
    }
}

/// A single multiple-choice question.
///
/// `correct_index` always addresses an element of `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft", into = "QuestionDraft")]
pub struct QuestionRecord {
    question: String,
    options: Vec<String>,
    correct_index: usize,
}

impl QuestionRecord {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// See [`QuestionDraft::validate`].
    pub fn new(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        QuestionDraft::new(question, options, correct_index).validate()
    }

    /// Rebuild a record whose invariants the caller already upholds.
    pub(crate) fn from_checked_parts(
        question: String,
        options: Vec<String>,
        correct_index: usize,
    ) -> Self {
        debug_assert!(options.len() >= MIN_OPTIONS);
        debug_assert!(correct_index < options.len());
        Self {
            question,
            options,
            correct_index,
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

impl TryFrom<QuestionDraft> for QuestionRecord {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<QuestionRecord> for QuestionDraft {
    fn from(record: QuestionRecord) -> Self {
        Self {
            question: record.question,
            options: record.options,
            correct_answer: record.correct_index,
        }
    }
}
