//! Per-session answer shuffling.

use rand::Rng;

use crate::model::{QuestionBank, QuestionRecord};

/// Return a copy of `question` with its options permuted uniformly at random.
///
/// Fisher–Yates over the option list. The correct option's position is
/// carried through every swap, so `correct_index` addresses the originally
/// correct option even when several options share the same text.
pub fn shuffle_question<R: Rng + ?Sized>(question: &QuestionRecord, rng: &mut R) -> QuestionRecord {
    let mut options = question.options().to_vec();
    let mut correct_index = question.correct_index();

    for i in (1..options.len()).rev() {
        let j = rng.random_range(0..=i);
        options.swap(i, j);
        if correct_index == i {
            correct_index = j;
        } else if correct_index == j {
            correct_index = i;
        }
    }

    QuestionRecord::from_checked_parts(question.question().to_owned(), options, correct_index)
}

/// Shuffle every question of the bank independently, keeping question order.
pub fn shuffle_bank<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> Vec<QuestionRecord> {
    bank.iter().map(|q| shuffle_question(q, rng)).collect()
}
