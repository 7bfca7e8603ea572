use serde::Serialize;

use crate::models::domain::AccessLevel;

#[derive(Debug, Clone, Serialize)]
pub struct CreateQuizResponse {
    pub message: String,
    pub form_id: String,
    pub form_link: String,
    pub access: AccessLevel,
    pub item_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub email: String,
}
