mod bank;
mod question;

pub use bank::{BankError, QuestionBank};
pub use question::{MIN_OPTIONS, QuestionDraft, QuestionError, QuestionRecord};
