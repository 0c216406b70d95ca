//! Display values derived from session state. Nothing here is stored.

use chrono::TimeDelta;
use quiz_core::model::QuestionRecord;

/// How a renderer should present one answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCategory {
    /// Not yet answered; every option looks the same.
    Neutral,
    CorrectHighlight,
    IncorrectHighlight,
    Dimmed,
}

/// Categorize option `index` of `question` given the reveal state.
#[must_use]
pub fn categorize(
    question: &QuestionRecord,
    index: usize,
    revealed: bool,
    selected: Option<usize>,
) -> OptionCategory {
    if !revealed {
        return OptionCategory::Neutral;
    }
    if question.is_correct(index) {
        OptionCategory::CorrectHighlight
    } else if selected == Some(index) {
        OptionCategory::IncorrectHighlight
    } else {
        OptionCategory::Dimmed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub text: String,
    pub category: OptionCategory,
}

/// Build the option list for `question` in display order.
#[must_use]
pub fn option_views(
    question: &QuestionRecord,
    revealed: bool,
    selected: Option<usize>,
) -> Vec<OptionView> {
    question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| OptionView {
            text: text.clone(),
            category: categorize(question, index, revealed, selected),
        })
        .collect()
}

/// Final result of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    /// Wall-clock time from session start to completion.
    pub elapsed: TimeDelta,
}

impl QuizSummary {
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64 * 100.0
    }

    /// Percentage with one fractional digit, e.g. `"66.7%"`.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage())
    }

    /// Time taken as `"42s"` or `"3m 05s"`.
    #[must_use]
    pub fn elapsed_label(&self) -> String {
        let secs = self.elapsed.num_seconds().max(0);
        if secs < 60 {
            format!("{secs}s")
        } else {
            format!("{}m {:02}s", secs / 60, secs % 60)
        }
    }
}
