#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::{Barrier, RwLock};

use sheet_quiz_server::{
    errors::{AppError, AppResult},
    models::{
        domain::SheetRow,
        google::forms::{BatchUpdateFormRequest, Form, Info, Request},
    },
    repositories::RowStore,
    services::{form_publisher::FormPublisher, question_source::QuestionSource},
};

/// Sheet tab kept in memory. Column ranges are ignored: every read returns
/// whole rows, the way `A:B` does on a two-column tab.
pub struct InMemoryRowStore {
    rows: Arc<RwLock<Vec<Vec<String>>>>,
    appends: AtomicUsize,
    updates: AtomicUsize,
    fail_reads: bool,
    read_barrier: Option<(Barrier, AtomicUsize)>,
}

impl InMemoryRowStore {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            appends: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            fail_reads: false,
            read_barrier: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn with_emails(emails: &[&str]) -> Self {
        Self::new(emails.iter().map(|e| vec![e.to_string()]).collect())
    }

    pub fn unreachable() -> Self {
        Self {
            fail_reads: true,
            ..Self::empty()
        }
    }

    /// The first `parties` reads wait for each other before returning, so
    /// concurrent callers all observe the same snapshot.
    pub fn with_synchronized_reads(parties: usize) -> Self {
        Self {
            read_barrier: Some((Barrier::new(parties), AtomicUsize::new(parties))),
            ..Self::empty()
        }
    }

    pub async fn rows(&self) -> Vec<Vec<String>> {
        self.rows.read().await.clone()
    }

    pub fn append_count(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

fn column_index(column: &str) -> usize {
    column
        .bytes()
        .fold(0, |acc, b| acc * 26 + (b.to_ascii_uppercase() - b'A' + 1) as usize)
        - 1
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn get_column(&self, _range: &str) -> AppResult<Vec<Vec<String>>> {
        if self.fail_reads {
            return Err(AppError::StoreUnavailable("store is offline".to_string()));
        }

        let snapshot = self.rows.read().await.clone();

        if let Some((barrier, remaining)) = &self.read_barrier {
            let held = remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if held {
                barrier.wait().await;
            }
        }

        Ok(snapshot)
    }

    async fn append_row(&self, values: Vec<String>) -> AppResult<()> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.rows.write().await.push(values);
        Ok(())
    }

    async fn update_cell(&self, row_index: usize, column: &str, value: &str) -> AppResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(row_index - 1)
            .ok_or_else(|| AppError::StoreUnavailable(format!("row {} out of range", row_index)))?;

        let col = column_index(column);
        if row.len() <= col {
            row.resize(col + 1, String::new());
        }
        row[col] = value.to_string();
        Ok(())
    }
}

pub struct StaticQuestionSource {
    rows: Vec<SheetRow>,
}

impl StaticQuestionSource {
    pub fn new(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|r| SheetRow::new(r.iter().copied()))
                .collect(),
        }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch_rows(&self, _spreadsheet_id: &str) -> AppResult<Vec<SheetRow>> {
        Ok(self.rows.clone())
    }
}

/// Form host that applies `createItem` requests the way the Forms API does,
/// after sending them through their JSON wire form.
pub struct InMemoryFormPublisher {
    forms: Arc<RwLock<HashMap<String, Form>>>,
    next_id: AtomicUsize,
}

impl InMemoryFormPublisher {
    pub fn new() -> Self {
        Self {
            forms: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicUsize::new(1),
        }
    }

    pub async fn form_count(&self) -> usize {
        self.forms.read().await.len()
    }
}

#[async_trait]
impl FormPublisher for InMemoryFormPublisher {
    async fn create_form(&self, title: &str) -> AppResult<Form> {
        let id = format!("form-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let form = Form {
            form_id: id.clone(),
            info: Info {
                title: title.to_string(),
                document_title: Some(title.to_string()),
            },
            ..Default::default()
        };
        self.forms.write().await.insert(id, form.clone());
        Ok(form)
    }

    async fn apply_batch(&self, form_id: &str, requests: Vec<Request>) -> AppResult<()> {
        let wire = serde_json::to_string(&BatchUpdateFormRequest {
            requests,
            include_form_in_response: false,
        })
        .map_err(|e| AppError::InternalError(e.to_string()))?;
        let batch: BatchUpdateFormRequest =
            serde_json::from_str(&wire).map_err(|e| AppError::InternalError(e.to_string()))?;

        let mut forms = self.forms.write().await;
        let form = forms
            .get_mut(form_id)
            .ok_or_else(|| AppError::ExternalApiError(format!("form {} not found", form_id)))?;

        for request in batch.requests {
            match request {
                Request::UpdateSettings(_) => {}
                Request::CreateItem(create) => {
                    let index = create.location.index.min(form.items.len());
                    let mut item = create.item;
                    item.item_id = Some(format!("item-{}", form.items.len()));
                    form.items.insert(index, item);
                }
            }
        }
        Ok(())
    }

    async fn get_form(&self, form_id: &str) -> AppResult<Form> {
        self.forms
            .read()
            .await
            .get(form_id)
            .cloned()
            .ok_or_else(|| AppError::ExternalApiError(format!("form {} not found", form_id)))
    }
}
