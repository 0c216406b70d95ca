use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use quiz_core::Clock;
use quiz_core::model::QuestionBank;
use rand::Rng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use super::service::{AdvanceTicket, QuizSession, QuizSnapshot};
use crate::config::QuizConfig;

struct Shared<R> {
    session: Mutex<QuizSession<R>>,
    pending: Mutex<Option<JoinHandle<()>>>,
    updates: watch::Sender<QuizSnapshot>,
}

impl<R> Shared<R> {
    fn session(&self) -> MutexGuard<'_, QuizSession<R>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, session: &QuizSession<R>) {
        self.updates.send_replace(session.snapshot());
    }
}

impl<R: Rng> Shared<R> {
    fn fire(&self, ticket: AdvanceTicket) {
        let mut session = self.session();
        if session.advance(ticket) {
            self.publish(&session);
        }
    }
}

/// Drives a [`QuizSession`] in real time.
///
/// Accepted answers schedule the auto-advance on the tokio runtime after
/// `reveal_delay`. Restarting aborts that task, and the session's generation
/// check drops it if it already woke up. Every change is published to
/// subscribers as a [`QuizSnapshot`].
pub struct QuizRunner<R = StdRng> {
    shared: Arc<Shared<R>>,
    reveal_delay: Duration,
}

impl QuizRunner<StdRng> {
    /// Start a runner over `bank` using the RNG and delay from `config`.
    #[must_use]
    pub fn start(bank: Arc<QuestionBank>, config: &QuizConfig) -> Self {
        let session = QuizSession::new(bank, config.rng(), Clock::default());
        Self::new(session, config.reveal_delay)
    }
}

impl<R> QuizRunner<R>
where
    R: Rng + Send + 'static,
{
    #[must_use]
    pub fn new(session: QuizSession<R>, reveal_delay: Duration) -> Self {
        let (updates, _) = watch::channel(session.snapshot());
        Self {
            shared: Arc::new(Shared {
                session: Mutex::new(session),
                pending: Mutex::new(None),
                updates,
            }),
            reveal_delay,
        }
    }

    /// Forward an answer intent. Returns whether it was accepted.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn answer(&self, index: usize) -> bool {
        // Lock order is session, then pending. The session guard stays held
        // until the new handle is stored, so an older answer can never
        // overwrite (and abort) the task of a newer one.
        let mut session = self.shared.session();
        let Some(ticket) = session.answer(index) else {
            return false;
        };
        self.shared.publish(&session);

        // Deadline is fixed at answer time, not when the task is first polled.
        let deadline = Instant::now() + self.reveal_delay;
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            shared.fire(ticket);
        });
        debug!(?ticket, delay = ?self.reveal_delay, "auto-advance scheduled");

        if let Some(previous) = self.shared.pending().replace(handle) {
            previous.abort();
        }
        drop(session);
        true
    }

    /// Forward a restart intent, cancelling any scheduled auto-advance.
    pub fn restart(&self) {
        let mut session = self.shared.session();
        if let Some(handle) = self.shared.pending().take() {
            handle.abort();
        }
        session.restart();
        self.shared.publish(&session);
    }
}

impl<R> QuizRunner<R> {
    /// Receive a snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.shared.updates.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.shared.session().snapshot()
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Whether an auto-advance is scheduled and has not run yet.
    #[must_use]
    pub fn has_pending_advance(&self) -> bool {
        self.shared
            .pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<R> Drop for QuizRunner<R> {
    fn drop(&mut self) {
        if let Some(handle) = self.shared.pending().take() {
            handle.abort();
        }
    }
}
