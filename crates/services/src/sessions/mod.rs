mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use progress::SessionProgress;
pub use service::{AdvanceTicket, QuizPhase, QuizSession, QuizSnapshot};
pub use view::{OptionCategory, OptionView, QuizSummary, categorize, option_views};
pub use workflow::QuizRunner;
