pub mod access;
pub mod quiz;
pub mod sheet_row;
pub use access::{AccessLevel, AccessRecord};
pub use quiz::{AnswerOption, QuizDefinition, QuizItem, QuizItemKind};
pub use sheet_row::SheetRow;
