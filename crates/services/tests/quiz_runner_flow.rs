use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{QuestionBank, QuestionDraft, QuestionRecord};
use quiz_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    OptionCategory, QuizConfig, QuizPhase, QuizRunner, QuizSession, QuizSnapshot, REVEAL_DELAY,
    builtin_bank, load_bank_from_str,
};
use tokio::time::Instant;

const TWO_QUESTIONS: &str = r#"[
    {"question": "A?", "options": ["x", "y"], "correctAnswer": 1},
    {"question": "B?", "options": ["p", "q"], "correctAnswer": 0}
]"#;

fn wrong_index(question: &QuestionRecord) -> usize {
    (0..question.option_count())
        .find(|i| !question.is_correct(*i))
        .expect("every question has a wrong option")
}

/// Runner over the two-question bank plus the shuffled questions it will ask.
fn two_question_runner(seed: u64) -> (QuizRunner<StdRng>, Vec<QuestionRecord>) {
    let bank = Arc::new(load_bank_from_str(TWO_QUESTIONS).unwrap());
    let session = QuizSession::new(bank, StdRng::seed_from_u64(seed), fixed_clock());
    let active = session.active_bank().to_vec();
    (QuizRunner::new(session, REVEAL_DELAY), active)
}

#[tokio::test(start_paused = true)]
async fn two_question_quiz_reports_fifty_percent() {
    let (runner, active) = two_question_runner(4);
    let mut updates = runner.subscribe();

    assert_eq!(active[0].correct_option(), "y");
    assert!(runner.answer(active[0].correct_index()));
    let snap = updates.borrow_and_update().clone();
    assert!(snap.is_revealed());
    assert_eq!(snap.score(), 1);

    let started = Instant::now();
    updates.changed().await.unwrap();
    assert!(started.elapsed() >= REVEAL_DELAY);
    let snap = updates.borrow_and_update().clone();
    assert_eq!(
        snap.phase,
        QuizPhase::InProgress {
            current_index: 1,
            revealed: false,
            selected_index: None,
        }
    );
    assert_eq!(snap.question.as_deref(), Some("B?"));

    assert!(runner.answer(wrong_index(&active[1])));
    let snap = updates.borrow_and_update().clone();
    assert_eq!(snap.score(), 1);

    updates.changed().await.unwrap();
    let snap = updates.borrow_and_update().clone();
    assert_eq!(snap.phase, QuizPhase::Complete { score: 1, total: 2 });
    assert!(snap.options.is_empty());
    assert_eq!(snap.summary.unwrap().percentage_label(), "50.0%");
}

#[tokio::test(start_paused = true)]
async fn repeated_answer_before_advance_is_ignored() {
    let (runner, active) = two_question_runner(8);
    let wrong = wrong_index(&active[0]);

    assert!(runner.answer(wrong));
    assert!(!runner.answer(active[0].correct_index()));

    let snap = runner.snapshot();
    assert_eq!(snap.score(), 0);
    assert_eq!(
        snap.phase,
        QuizPhase::InProgress {
            current_index: 0,
            revealed: true,
            selected_index: Some(wrong),
        }
    );
    assert_eq!(snap.options[wrong].category, OptionCategory::IncorrectHighlight);
}

#[tokio::test(start_paused = true)]
async fn advance_waits_for_the_full_delay() {
    let (runner, _) = two_question_runner(2);
    let mut updates = runner.subscribe();

    runner.answer(0);
    updates.borrow_and_update();

    tokio::time::advance(REVEAL_DELAY - Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
    assert!(!updates.has_changed().unwrap());
    assert!(runner.has_pending_advance());
    assert!(runner.snapshot().is_revealed());

    tokio::time::advance(Duration::from_millis(1)).await;
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow().progress.question_number, 2);
}

#[tokio::test(start_paused = true)]
async fn restart_cancels_pending_advance() {
    let (runner, active) = two_question_runner(6);
    assert!(runner.answer(active[0].correct_index()));
    runner.restart();

    let snap = runner.snapshot();
    assert_eq!(snap.generation, 1);
    assert_eq!(snap.score(), 0);
    assert!(!snap.is_revealed());

    tokio::time::sleep(REVEAL_DELAY * 3).await;

    let snap = runner.snapshot();
    assert_eq!(
        snap.phase,
        QuizPhase::InProgress {
            current_index: 0,
            revealed: false,
            selected_index: None,
        }
    );
    assert!(!runner.has_pending_advance());
}

#[tokio::test(start_paused = true)]
async fn restart_after_completion_starts_over() {
    let (runner, active) = two_question_runner(12);
    let mut updates = runner.subscribe();

    for question in &active {
        assert!(runner.answer(question.correct_index()));
        updates.borrow_and_update();
        updates.changed().await.unwrap();
    }
    assert_eq!(
        updates.borrow_and_update().phase,
        QuizPhase::Complete { score: 2, total: 2 }
    );

    runner.restart();
    let snap = updates.borrow_and_update().clone();
    assert_eq!(snap.score(), 0);
    assert_eq!(snap.progress.question_number, 1);
    assert!(!snap.is_complete());
    assert_eq!(snap.summary, None);
}

#[tokio::test(start_paused = true)]
async fn configured_delay_is_honored() {
    let bank = Arc::new(builtin_bank().unwrap());
    let config = QuizConfig::default()
        .with_seed(3)
        .with_reveal_delay(Duration::from_millis(200));
    let runner = QuizRunner::start(bank, &config);
    let mut updates = runner.subscribe();

    let started = Instant::now();
    assert!(runner.answer(0));
    updates.borrow_and_update();
    updates.changed().await.unwrap();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < REVEAL_DELAY);
    assert_eq!(updates.borrow().progress.question_number, 2);
}

#[tokio::test]
async fn same_seed_same_option_order() {
    let bank = Arc::new(builtin_bank().unwrap());
    let config = QuizConfig::default().with_seed(17);
    let a = QuizRunner::start(Arc::clone(&bank), &config).snapshot();
    let b = QuizRunner::start(bank, &config).snapshot();
    assert_eq!(a.options, b.options);
    assert_eq!(a.question, b.question);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_answers_always_reach_completion() {
    let bank = Arc::new(
        QuestionBank::from_drafts(
            (0..20).map(|i| QuestionDraft::new(format!("Q{i}"), ["a", "b", "c"], i % 3)),
        )
        .unwrap(),
    );

    for seed in 0..50 {
        let config = QuizConfig::default()
            .with_seed(seed)
            .with_reveal_delay(Duration::ZERO);
        let runner = Arc::new(QuizRunner::start(Arc::clone(&bank), &config));
        let mut updates = runner.subscribe();

        let players: Vec<_> = (0..4)
            .map(|player| {
                let runner = Arc::clone(&runner);
                tokio::spawn(async move {
                    while !runner.snapshot().is_complete() {
                        runner.answer(player % 3);
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        let finished = tokio::time::timeout(
            Duration::from_secs(10),
            updates.wait_for(QuizSnapshot::is_complete),
        )
        .await
        .is_ok_and(|done| done.is_ok());
        assert!(finished, "seed {seed}: quiz stopped on a revealed question");

        for player in players {
            player.await.unwrap();
        }
        assert_eq!(runner.snapshot().progress.total, 20);
    }
}
