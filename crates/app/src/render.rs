use std::fmt::Write as _;

use services::{OptionCategory, QuizPhase, QuizSnapshot};

fn marker(category: OptionCategory) -> &'static str {
    match category {
        OptionCategory::Neutral => " ",
        OptionCategory::CorrectHighlight => "+",
        OptionCategory::IncorrectHighlight => "x",
        OptionCategory::Dimmed => "·",
    }
}

/// Plain-text frame for one snapshot.
#[must_use]
pub fn render(snapshot: &QuizSnapshot) -> String {
    let mut out = String::new();
    match snapshot.phase {
        QuizPhase::Complete { score, total } => {
            let _ = writeln!(out, "Quiz complete!");
            let _ = writeln!(out, "Your score: {score} out of {total}");
            if let Some(summary) = snapshot.summary {
                let _ = writeln!(out, "Percentage: {}", summary.percentage_label());
                let _ = writeln!(out, "Time taken: {}", summary.elapsed_label());
            }
            let _ = writeln!(out, "[r] restart  [q] quit");
        }
        QuizPhase::InProgress { revealed, .. } => {
            let progress = snapshot.progress;
            let _ = writeln!(
                out,
                "Question {}/{}  ({:.0}%)  Score: {}",
                progress.question_number,
                progress.total,
                progress.percent(),
                progress.score
            );
            if let Some(question) = &snapshot.question {
                let _ = writeln!(out, "{question}");
            }
            for (i, option) in snapshot.options.iter().enumerate() {
                let _ = writeln!(out, " {} {}. {}", marker(option.category), i + 1, option.text);
            }
            if !revealed {
                let _ = writeln!(out, "[1-{}] answer  [r] restart  [q] quit", snapshot.options.len());
            }
        }
    }
    out
}
