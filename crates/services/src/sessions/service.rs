use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::{QuestionBank, QuestionRecord};
use quiz_core::shuffle::shuffle_bank;
use rand::Rng;
use tracing::{debug, info, warn};

use super::progress::SessionProgress;
use super::view::{OptionCategory, OptionView, QuizSummary, categorize, option_views};

//
// ─── PHASE & TICKETS ───────────────────────────────────────────────────────────
//

/// Observable state of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress {
        current_index: usize,
        revealed: bool,
        selected_index: Option<usize>,
    },
    Complete {
        score: usize,
        total: usize,
    },
}

/// Permission to run the deferred advance for one accepted answer.
///
/// Only honored while the session is still on the same generation and
/// question it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    generation: u64,
    question_index: usize,
}

impl AdvanceTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One playthrough of a question bank.
///
/// Holds a shuffled copy of the bank and steps through it. Answering reveals
/// the result and hands back an [`AdvanceTicket`]; the caller redeems it after
/// the reveal delay. `restart` reshuffles and invalidates outstanding tickets.
pub struct QuizSession<R> {
    bank: Arc<QuestionBank>,
    active: Vec<QuestionRecord>,
    current: usize,
    score: usize,
    revealed: bool,
    selected: Option<usize>,
    complete: bool,
    generation: u64,
    rng: R,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl<R: Rng> QuizSession<R> {
    /// Start a session over `bank`, shuffling every question with `rng`.
    pub fn new(bank: Arc<QuestionBank>, mut rng: R, clock: Clock) -> Self {
        let active = shuffle_bank(&bank, &mut rng);
        info!(questions = active.len(), "quiz session started");
        Self {
            bank,
            active,
            current: 0,
            score: 0,
            revealed: false,
            selected: None,
            complete: false,
            generation: 0,
            rng,
            started_at: clock.now(),
            clock,
            completed_at: None,
        }
    }

    /// Pick option `index` for the current question.
    ///
    /// Returns `None` and changes nothing when an answer is already revealed,
    /// the quiz is complete, or `index` is not an option of this question.
    pub fn answer(&mut self, index: usize) -> Option<AdvanceTicket> {
        if self.revealed || self.complete {
            debug!(index, "answer ignored while revealed");
            return None;
        }

        let question = &self.active[self.current];
        if index >= question.option_count() {
            warn!(
                index,
                options = question.option_count(),
                "answer index out of range, ignoring"
            );
            return None;
        }

        let correct = question.is_correct(index);
        self.selected = Some(index);
        self.revealed = true;
        if correct {
            self.score += 1;
        }
        debug!(
            question = self.current,
            index,
            correct,
            score = self.score,
            "answer revealed"
        );

        Some(AdvanceTicket {
            generation: self.generation,
            question_index: self.current,
        })
    }

    /// Run the deferred transition for an accepted answer.
    ///
    /// Moves to the next question, or completes the quiz after the last one.
    /// Returns `false` for stale tickets, which leave the session untouched.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> bool {
        if ticket.generation != self.generation
            || ticket.question_index != self.current
            || !self.revealed
            || self.complete
        {
            debug!(?ticket, generation = self.generation, "stale advance ticket dropped");
            return false;
        }

        if self.current + 1 >= self.active.len() {
            self.complete = true;
            self.completed_at = Some(self.clock.now());
            info!(score = self.score, total = self.active.len(), "quiz complete");
        } else {
            self.current += 1;
            self.revealed = false;
            self.selected = None;
            debug!(question = self.current, "advanced to next question");
        }
        true
    }

    /// Reshuffle the bank and start over from the first question.
    pub fn restart(&mut self) {
        self.active = shuffle_bank(&self.bank, &mut self.rng);
        self.current = 0;
        self.score = 0;
        self.revealed = false;
        self.selected = None;
        self.complete = false;
        self.generation = self.generation.wrapping_add(1);
        self.started_at = self.clock.now();
        self.completed_at = None;
        info!(generation = self.generation, "quiz restarted");
    }
}

impl<R> QuizSession<R> {
    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.complete {
            QuizPhase::Complete {
                score: self.score,
                total: self.total(),
            }
        } else {
            QuizPhase::InProgress {
                current_index: self.current,
                revealed: self.revealed,
                selected_index: self.selected,
            }
        }
    }

    /// The question on screen, or `None` once the quiz is complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        if self.complete {
            None
        } else {
            self.active.get(self.current)
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// This playthrough's shuffled questions.
    #[must_use]
    pub fn active_bank(&self) -> &[QuestionRecord] {
        &self.active
    }

    /// The unshuffled bank the session was started from.
    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            question_number: (self.current + 1).min(self.total()),
            total: self.total(),
            score: self.score,
            is_complete: self.complete,
        }
    }

    /// Presentation category for option `index` of the current question.
    #[must_use]
    pub fn option_category(&self, index: usize) -> Option<OptionCategory> {
        let question = self.current_question()?;
        (index < question.option_count())
            .then(|| categorize(question, index, self.revealed, self.selected))
    }

    #[must_use]
    pub fn option_views(&self) -> Vec<OptionView> {
        self.current_question()
            .map(|q| option_views(q, self.revealed, self.selected))
            .unwrap_or_default()
    }

    /// Final score, available once the quiz is complete.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        let completed_at = self.completed_at.filter(|_| self.complete)?;
        Some(QuizSummary {
            score: self.score,
            total: self.total(),
            elapsed: completed_at - self.started_at,
        })
    }

    /// Capture everything a renderer needs in one owned value.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            generation: self.generation,
            phase: self.phase(),
            question: self.current_question().map(|q| q.question().to_owned()),
            options: self.option_views(),
            progress: self.progress(),
            summary: self.summary(),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

impl<R> fmt::Debug for QuizSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("total", &self.active.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("revealed", &self.revealed)
            .field("selected", &self.selected)
            .field("complete", &self.complete)
            .field("generation", &self.generation)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

/// Renderer-facing copy of a session's state.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot {
    pub generation: u64,
    pub phase: QuizPhase,
    pub question: Option<String>,
    pub options: Vec<OptionView>,
    pub progress: SessionProgress,
    pub summary: Option<QuizSummary>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn score(&self) -> usize {
        self.progress.score
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, QuizPhase::InProgress { revealed: true, .. })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, QuizPhase::Complete { .. })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
