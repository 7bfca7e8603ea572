use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerOption {
    pub text: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizItemKind {
    SingleChoice, // At most one correct option
    MultiChoice,  // More than one correct option
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub kind: QuizItemKind,
    pub point_value: i32, // 0 means ungraded
}

impl QuizItem {
    pub fn correct_answers(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.correct)
            .map(|o| o.text.as_str())
    }

    pub fn is_graded(&self) -> bool {
        self.point_value > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizDefinition {
    pub title: String,
    /// Prepend a required "your name" field and a section break when published.
    pub collect_respondent_name: bool,
    pub items: Vec<QuizItem>,
}

impl QuizDefinition {
    pub fn has_graded_items(&self) -> bool {
        self.items.iter().any(QuizItem::is_graded)
    }
}
