//! Maps a `QuizDefinition` onto Forms API `batchUpdate` requests and reads
//! a published form back into quiz items.

use crate::{
    constants::google::NAME_PROMPT,
    models::{
        domain::{AnswerOption, QuizDefinition, QuizItem, QuizItemKind},
        google::forms::{
            ChoiceOption, ChoiceQuestion, ChoiceType, CorrectAnswer, CorrectAnswers,
            CreateItemRequest, Form, FormSettings, Grading, Item, Location, PageBreakItem,
            Question, QuestionItem, QuizSettings, Request, TextQuestion, UpdateSettingsRequest,
        },
    },
};

pub fn build_requests(definition: &QuizDefinition) -> Vec<Request> {
    let mut requests = Vec::with_capacity(definition.items.len() + 3);

    if definition.has_graded_items() {
        requests.push(Request::UpdateSettings(UpdateSettingsRequest {
            settings: FormSettings {
                quiz_settings: QuizSettings { is_quiz: true },
            },
            update_mask: "quizSettings.isQuiz".to_string(),
        }));
    }

    let mut preamble = Vec::new();
    if definition.collect_respondent_name {
        preamble.push(name_item());
        preamble.push(Item {
            page_break_item: Some(PageBreakItem {}),
            ..Default::default()
        });
    }

    let items = preamble
        .into_iter()
        .chain(definition.items.iter().map(quiz_item_to_form_item));

    requests.extend(items.enumerate().map(|(index, item)| {
        Request::CreateItem(CreateItemRequest {
            item,
            location: Location { index },
        })
    }));

    requests
}

fn name_item() -> Item {
    Item {
        title: NAME_PROMPT.to_string(),
        question_item: Some(QuestionItem {
            question: Question {
                required: true,
                text_question: Some(TextQuestion { paragraph: false }),
                ..Default::default()
            },
        }),
        ..Default::default()
    }
}

fn quiz_item_to_form_item(item: &QuizItem) -> Item {
    let grading = item.is_graded().then(|| Grading {
        point_value: item.point_value,
        correct_answers: Some(CorrectAnswers {
            answers: item
                .correct_answers()
                .map(|value| CorrectAnswer {
                    value: value.to_string(),
                })
                .collect(),
        }),
    });

    let choice_type = match item.kind {
        QuizItemKind::SingleChoice => ChoiceType::Radio,
        QuizItemKind::MultiChoice => ChoiceType::Checkbox,
    };

    Item {
        title: item.question.clone(),
        question_item: Some(QuestionItem {
            question: Question {
                required: true,
                grading,
                choice_question: Some(ChoiceQuestion {
                    choice_type,
                    options: item
                        .options
                        .iter()
                        .map(|o| ChoiceOption {
                            value: o.text.clone(),
                        })
                        .collect(),
                    shuffle: false,
                }),
                ..Default::default()
            },
        }),
        ..Default::default()
    }
}

/// Reads the choice questions of a form back as quiz items. Text questions
/// and page breaks (the name preamble) are skipped.
pub fn quiz_items_from_form(form: &Form) -> Vec<QuizItem> {
    form.items.iter().filter_map(form_item_to_quiz_item).collect()
}

fn form_item_to_quiz_item(item: &Item) -> Option<QuizItem> {
    let question = &item.question_item.as_ref()?.question;
    let choice = question.choice_question.as_ref()?;

    let correct: Vec<&str> = question
        .grading
        .as_ref()
        .and_then(|g| g.correct_answers.as_ref())
        .map(|c| c.answers.iter().map(|a| a.value.as_str()).collect())
        .unwrap_or_default();

    let kind = match choice.choice_type {
        ChoiceType::Checkbox => QuizItemKind::MultiChoice,
        ChoiceType::Radio | ChoiceType::DropDown => QuizItemKind::SingleChoice,
    };

    Some(QuizItem {
        question: item.title.clone(),
        options: choice
            .options
            .iter()
            .map(|o| AnswerOption {
                text: o.value.clone(),
                correct: correct.contains(&o.value.as_str()),
            })
            .collect(),
        kind,
        point_value: question.grading.as_ref().map_or(0, |g| g.point_value),
    })
}
