use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    constants::google::FORMS_API_BASE,
    errors::AppResult,
    models::google::forms::{
        BatchUpdateFormRequest, CreateFormInfo, CreateFormRequest, Form, Request,
    },
    services::http_helpers::{api_url, ensure_success},
};

/// Hosts a quiz as a gradable form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormPublisher: Send + Sync {
    /// Creates an empty form and returns it (id and responder link).
    async fn create_form(&self, title: &str) -> AppResult<Form>;
    async fn apply_batch(&self, form_id: &str, requests: Vec<Request>) -> AppResult<()>;
    async fn get_form(&self, form_id: &str) -> AppResult<Form>;
}

pub struct GoogleFormsPublisher {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl GoogleFormsPublisher {
    pub fn new(http: reqwest::Client, token: SecretString) -> Self {
        Self {
            http,
            base_url: FORMS_API_BASE.to_string(),
            token,
        }
    }
}

#[async_trait]
impl FormPublisher for GoogleFormsPublisher {
    async fn create_form(&self, title: &str) -> AppResult<Form> {
        let url = api_url(&self.base_url, &["forms"])?;
        let body = CreateFormRequest {
            info: CreateFormInfo {
                title,
                document_title: title,
            },
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await?;
        let form = ensure_success(response, "Forms create")
            .await?
            .json::<Form>()
            .await?;

        log::info!("Created form {}", form.form_id);
        Ok(form)
    }

    async fn apply_batch(&self, form_id: &str, requests: Vec<Request>) -> AppResult<()> {
        let target = format!("{}:batchUpdate", form_id);
        let url = api_url(&self.base_url, &["forms", target.as_str()])?;
        let count = requests.len();
        let body = BatchUpdateFormRequest {
            requests,
            include_form_in_response: false,
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await?;
        ensure_success(response, "Forms batchUpdate").await?;

        log::debug!("Applied {} requests to form {}", count, form_id);
        Ok(())
    }

    async fn get_form(&self, form_id: &str) -> AppResult<Form> {
        let url = api_url(&self.base_url, &["forms", form_id])?;

        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;
        let form = ensure_success(response, "Forms get")
            .await?
            .json::<Form>()
            .await?;
        Ok(form)
    }
}
