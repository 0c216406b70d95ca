#![forbid(unsafe_code)]

pub mod bank_loader;
pub mod config;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use bank_loader::{builtin_bank, load_bank_from_path, load_bank_from_str};
pub use config::{QuizConfig, REVEAL_DELAY};
pub use error::BankLoadError;

pub use sessions::{
    AdvanceTicket, OptionCategory, OptionView, QuizPhase, QuizRunner, QuizSession, QuizSnapshot,
    QuizSummary, SessionProgress,
};
