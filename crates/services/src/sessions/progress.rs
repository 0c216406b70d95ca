/// Where the player is in the quiz, for progress bars and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based number of the question on screen.
    pub question_number: usize,
    pub total: usize,
    pub score: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Fraction of the quiz reached, `question_number / total`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.question_number as f64 / self.total as f64
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}
