use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    constants::google::form_view_link,
    errors::AppResult,
    models::{
        domain::AccessLevel,
        dto::{request::CreateQuizRequest, response::CreateQuizResponse},
    },
    services::{
        access_gate::AccessGate,
        form_mapping::build_requests,
        form_publisher::FormPublisher,
        identity::IdentityProvider,
        question_source::QuestionSource,
        quiz_compiler::{compile, CompileOptions},
        sheet_url::extract_spreadsheet_id,
    },
};

pub struct QuizService {
    access_gate: Arc<AccessGate>,
    compile_options: CompileOptions,
    default_title: String,
}

impl QuizService {
    pub fn new(
        access_gate: Arc<AccessGate>,
        compile_options: CompileOptions,
        default_title: &str,
    ) -> Self {
        Self {
            access_gate,
            compile_options,
            default_title: default_title.to_string(),
        }
    }

    /// Reads the linked sheet, publishes it as a graded form and charges
    /// limited users for the use.
    ///
    /// Nothing is rolled back on failure: a form that was created before a
    /// later step failed stays in the user's account.
    pub async fn create_quiz(
        &self,
        request: CreateQuizRequest,
        identity: &dyn IdentityProvider,
        source: &dyn QuestionSource,
        publisher: &dyn FormPublisher,
    ) -> AppResult<CreateQuizResponse> {
        request.validate()?;
        let spreadsheet_id = extract_spreadsheet_id(&request.sheet_url)?;

        let email = identity.current_user_email().await?;
        let access = self.access_gate.check_access(&email, Utc::now()).await?;

        let rows = source.fetch_rows(&spreadsheet_id).await?;
        let title = request.title_or(&self.default_title);
        let definition = compile(&rows, title, &self.compile_options)?;

        let form = publisher.create_form(&definition.title).await?;
        publisher
            .apply_batch(&form.form_id, build_requests(&definition))
            .await?;

        log::info!(
            "{} created form {} with {} questions from sheet {}",
            email,
            form.form_id,
            definition.items.len(),
            spreadsheet_id
        );

        if access == AccessLevel::Limited {
            if let Err(e) = self.access_gate.record_use(&email, Utc::now()).await {
                log::warn!("Could not record quiz creation for {}: {}", email, e);
            }
        }

        let form_link = form
            .responder_uri
            .clone()
            .unwrap_or_else(|| form_view_link(&form.form_id));

        Ok(CreateQuizResponse {
            message: "Quiz created".to_string(),
            form_id: form.form_id,
            form_link,
            access,
            item_count: definition.items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::AppError,
        models::{domain::SheetRow, google::forms::Form},
        repositories::MockRowStore,
        services::{
            access_gate::AccessPolicy, form_publisher::MockFormPublisher,
            identity::MockIdentityProvider, question_source::MockQuestionSource,
        },
    };

    const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/sheet123/edit";

    fn request(sheet_url: &str) -> CreateQuizRequest {
        CreateQuizRequest {
            sheet_url: sheet_url.to_string(),
            title: None,
        }
    }

    fn identity() -> MockIdentityProvider {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_user_email()
            .returning(|| Ok("u@x.com".to_string()));
        identity
    }

    fn source() -> MockQuestionSource {
        let mut source = MockQuestionSource::new();
        source
            .expect_fetch_rows()
            .withf(|id| id == "sheet123")
            .returning(|_| {
                Ok(vec![
                    SheetRow::new(["Q1", "*A", "B"]),
                    SheetRow::new(["Q2", "*C", "*D", "E"]),
                ])
            });
        source
    }

    fn publisher() -> MockFormPublisher {
        let mut publisher = MockFormPublisher::new();
        publisher.expect_create_form().times(1).returning(|title| {
            Ok(Form {
                form_id: "form1".to_string(),
                info: crate::models::google::forms::Info {
                    title: title.to_string(),
                    document_title: None,
                },
                ..Default::default()
            })
        });
        publisher
            .expect_apply_batch()
            .times(1)
            .returning(|_, _| Ok(()));
        publisher
    }

    /// Limited store where `u@x.com` exists with no timestamp.
    fn service(update_result: Option<AppResult<()>>) -> QuizService {
        let mut unlimited = MockRowStore::new();
        unlimited.expect_get_column().returning(|_| Ok(vec![]));

        let mut limited = MockRowStore::new();
        limited
            .expect_get_column()
            .returning(|_| Ok(vec![vec!["u@x.com".to_string()]]));
        match update_result {
            Some(result) => {
                limited
                    .expect_update_cell()
                    .times(1)
                    .returning(move |_, _, _| result.clone());
            }
            None => {
                limited.expect_update_cell().never();
            }
        }

        let gate = AccessGate::new(Arc::new(unlimited), Arc::new(limited), AccessPolicy::default());
        QuizService::new(
            Arc::new(gate),
            CompileOptions::default(),
            "Quiz from Google Sheets",
        )
    }

    #[actix_web::test]
    async fn creates_quiz_and_records_use() {
        let response = service(Some(Ok(())))
            .create_quiz(request(SHEET_URL), &identity(), &source(), &publisher())
            .await
            .unwrap();

        assert_eq!(response.form_id, "form1");
        assert_eq!(response.form_link, "https://docs.google.com/forms/d/form1/viewform");
        assert_eq!(response.access, AccessLevel::Limited);
        assert_eq!(response.item_count, 2);
    }

    #[actix_web::test]
    async fn bookkeeping_failure_does_not_fail_request() {
        let response = service(Some(Err(AppError::StoreUnavailable("down".to_string()))))
            .create_quiz(request(SHEET_URL), &identity(), &source(), &publisher())
            .await
            .unwrap();

        assert_eq!(response.form_id, "form1");
    }

    #[actix_web::test]
    async fn malformed_url_is_rejected_before_external_calls() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_current_user_email().never();
        let mut source = MockQuestionSource::new();
        source.expect_fetch_rows().never();
        let mut publisher = MockFormPublisher::new();
        publisher.expect_create_form().never();

        let result = service(None)
            .create_quiz(
                request("https://example.com/not-a-sheet"),
                &identity,
                &source,
                &publisher,
            )
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn unusable_sheet_creates_no_form() {
        let mut source = MockQuestionSource::new();
        source
            .expect_fetch_rows()
            .returning(|_| Ok(vec![SheetRow::new(["just a question"])]));
        let mut publisher = MockFormPublisher::new();
        publisher.expect_create_form().never();

        let result = service(None)
            .create_quiz(request(SHEET_URL), &identity(), &source, &publisher)
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn failed_batch_aborts_without_recording_use() {
        let mut publisher = MockFormPublisher::new();
        publisher.expect_create_form().returning(|_| {
            Ok(Form {
                form_id: "orphan".to_string(),
                ..Default::default()
            })
        });
        publisher
            .expect_apply_batch()
            .returning(|_, _| Err(AppError::ExternalApiError("400".to_string())));

        let result = service(None)
            .create_quiz(request(SHEET_URL), &identity(), &source(), &publisher)
            .await;

        assert!(matches!(result, Err(AppError::ExternalApiError(_))));
    }

    #[actix_web::test]
    async fn custom_title_is_used_for_the_form() {
        let mut publisher = MockFormPublisher::new();
        publisher
            .expect_create_form()
            .withf(|title| title == "Week 3")
            .times(1)
            .returning(|_| {
                Ok(Form {
                    form_id: "form1".to_string(),
                    responder_uri: Some("https://docs.google.com/forms/d/e/xyz/viewform".to_string()),
                    ..Default::default()
                })
            });
        publisher.expect_apply_batch().returning(|_, _| Ok(()));

        let mut request = request(SHEET_URL);
        request.title = Some("Week 3".to_string());

        let response = service(Some(Ok(())))
            .create_quiz(request, &identity(), &source(), &publisher)
            .await
            .unwrap();
        assert_eq!(response.form_link, "https://docs.google.com/forms/d/e/xyz/viewform");
    }
}
