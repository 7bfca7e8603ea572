//! Subset of the Forms API v1 resources used to publish a quiz.
//!
//! Field names follow the REST representation (camelCase); absent optional
//! fields are omitted so request bodies only carry what is being set.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub form_id: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responder_uri: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_item: Option<QuestionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_break_item: Option<PageBreakItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionItem {
    pub question: Question,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading: Option<Grading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_question: Option<ChoiceQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_question: Option<TextQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoiceType {
    Radio,
    Checkbox,
    DropDown,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceQuestion {
    #[serde(rename = "type")]
    pub choice_type: ChoiceType,
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub shuffle: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChoiceOption {
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextQuestion {
    #[serde(default)]
    pub paragraph: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageBreakItem {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grading {
    pub point_value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<CorrectAnswers>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CorrectAnswers {
    pub answers: Vec<CorrectAnswer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CorrectAnswer {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub quiz_settings: QuizSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    pub is_quiz: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Location {
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub settings: FormSettings,
    pub update_mask: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateItemRequest {
    pub item: Item,
    pub location: Location,
}

/// One entry of a `batchUpdate` call, e.g. `{"createItem": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    UpdateSettings(UpdateSettingsRequest),
    CreateItem(CreateItemRequest),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateFormRequest {
    pub requests: Vec<Request>,
    #[serde(default)]
    pub include_form_in_response: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreateFormRequest<'a> {
    pub info: CreateFormInfo<'a>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormInfo<'a> {
    pub title: &'a str,
    pub document_title: &'a str,
}
