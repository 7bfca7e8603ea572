//! Turns spreadsheet rows into a gradable multiple-choice quiz.
//!
//! Row layout: the first cell is the question, every following cell is an
//! answer option. An option whose text starts with `*` is a correct answer;
//! the marker is removed from the displayed text. Only a leading marker is
//! recognised, so `4*` is shown literally. Repeated option texts within a row
//! collapse into the first occurrence, which is correct if any copy was marked.

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AnswerOption, QuizDefinition, QuizItem, QuizItemKind, SheetRow},
};

pub const CORRECT_MARKER: char = '*';

#[derive(Clone, Debug)]
pub struct CompileOptions {
    pub collect_respondent_name: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            collect_respondent_name: true,
        }
    }
}

/// Compiles `rows` into a quiz titled `title`.
///
/// Rows that do not carry a question and at least one non-blank option are
/// skipped. Items without any marked option are kept ungraded. Fails with
/// `ValidationError` when no row is usable.
pub fn compile(
    rows: &[SheetRow],
    title: &str,
    options: &CompileOptions,
) -> AppResult<QuizDefinition> {
    let items: Vec<QuizItem> = rows.iter().filter_map(compile_row).collect();

    if items.is_empty() {
        return Err(AppError::ValidationError(
            "The sheet has no rows with a question and at least one answer".to_string(),
        ));
    }

    log::debug!(
        "Compiled {} of {} rows into quiz '{}'",
        items.len(),
        rows.len(),
        title
    );

    Ok(QuizDefinition {
        title: title.to_string(),
        collect_respondent_name: options.collect_respondent_name,
        items,
    })
}

fn compile_row(row: &SheetRow) -> Option<QuizItem> {
    if row.len() < 2 {
        return None;
    }

    let mut options: Vec<AnswerOption> = Vec::new();
    for option in row.raw_options().iter().filter_map(|cell| parse_option(cell)) {
        match options.iter_mut().find(|o| o.text == option.text) {
            Some(existing) => existing.correct |= option.correct,
            None => options.push(option),
        }
    }

    if options.is_empty() {
        return None;
    }

    let correct_count = options.iter().filter(|o| o.correct).count();
    let kind = if correct_count > 1 {
        QuizItemKind::MultiChoice
    } else {
        QuizItemKind::SingleChoice
    };

    Some(QuizItem {
        question: row.question().unwrap_or_default().trim().to_string(),
        options,
        kind,
        point_value: if correct_count > 0 { 1 } else { 0 },
    })
}

/// `None` for options that are blank once trimmed and unmarked.
fn parse_option(cell: &str) -> Option<AnswerOption> {
    let cell = cell.trim();
    let (text, correct) = match cell.strip_prefix(CORRECT_MARKER) {
        Some(rest) => (rest.trim(), true),
        None => (cell, false),
    };

    if text.is_empty() {
        return None;
    }

    Some(AnswerOption {
        text: text.to_string(),
        correct,
    })
}
