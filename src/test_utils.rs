#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::SheetRow;

    /// A small sheet: one single-choice, one multi-choice and one ungraded row.
    pub fn sample_rows() -> Vec<SheetRow> {
        vec![
            SheetRow::new(["Capital of France?", "*Paris", "London", "Rome"]),
            SheetRow::new(["Prime numbers?", "*2", "*3", "4"]),
            SheetRow::new(["Favourite colour?", "Red", "Blue"]),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::*, test_helpers::*};
    use crate::{
        models::domain::QuizItemKind,
        services::quiz_compiler::{compile, CompileOptions},
    };
    use actix_web::http::StatusCode;

    #[test]
    fn test_sample_rows_compile() {
        let quiz = compile(&sample_rows(), "Sample", &CompileOptions::default()).unwrap();

        let kinds: Vec<_> = quiz.items.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                QuizItemKind::SingleChoice,
                QuizItemKind::MultiChoice,
                QuizItemKind::SingleChoice
            ]
        );
        assert_eq!(quiz.items[2].point_value, 0);
    }

    #[test]
    fn test_status_helpers() {
        assert_error_status(StatusCode::BAD_REQUEST);
        assert_success_status(StatusCode::CREATED);
    }
}
