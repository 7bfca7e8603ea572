use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{access::format_timestamp, AccessLevel, AccessRecord},
    repositories::RowStore,
};

const EMAIL_RANGE: &str = "A:A";
const RECORD_RANGE: &str = "A:B";
const LAST_USED_COLUMN: &str = "B";

#[derive(Clone, Debug)]
pub struct AccessPolicy {
    pub cooldown: Duration,
    pub allow_self_registration: bool,
}

impl AccessPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cooldown: config.limited_cooldown(),
            allow_self_registration: config.allow_self_registration,
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            cooldown: Duration::hours(24),
            allow_self_registration: true,
        }
    }
}

/// Two-tier usage gate backed by an unlimited and a limited allow-list.
///
/// Rows are fetched fresh on every call and matched on the first column,
/// exact and case-sensitive; the first matching row wins. Registration of a
/// new identity is a read followed by an append with no lock in between, so
/// concurrent first requests from the same identity can both append a row.
/// Every lookup uses the first row, so such duplicates are harmless.
pub struct AccessGate {
    unlimited: Arc<dyn RowStore>,
    limited: Arc<dyn RowStore>,
    policy: AccessPolicy,
}

impl AccessGate {
    pub fn new(
        unlimited: Arc<dyn RowStore>,
        limited: Arc<dyn RowStore>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            unlimited,
            limited,
            policy,
        }
    }

    pub async fn check_access(&self, email: &str, now: DateTime<Utc>) -> AppResult<AccessLevel> {
        if email.trim().is_empty() {
            return Err(AppError::NotAuthorized(
                "No email address is associated with this account".to_string(),
            ));
        }

        // The unlimited list is a side index: if it cannot be read we still
        // decide on the limited list instead of blocking everyone.
        match self.unlimited.get_column(EMAIL_RANGE).await {
            Ok(rows) if find_row(&rows, email).is_some() => {
                log::info!("Access for {}: unlimited", email);
                return Ok(AccessLevel::Unlimited);
            }
            Ok(_) => {}
            Err(e) => log::warn!("Unlimited access list unavailable, falling back: {}", e),
        }

        match self.find_limited(email).await? {
            Some(record) => {
                if let Some(retry_at) = record.cooldown_ends_at(now, self.policy.cooldown) {
                    log::info!("Access for {}: rate limited until {}", email, retry_at);
                    return Err(AppError::RateLimited { retry_at });
                }
                log::info!("Access for {}: limited", email);
                Ok(AccessLevel::Limited)
            }
            None => {
                self.register(email, now).await?;
                Ok(AccessLevel::Limited)
            }
        }
    }

    /// Stamps the identity's limited row with `now`. A missing row is logged
    /// and otherwise ignored.
    pub async fn record_use(&self, email: &str, now: DateTime<Utc>) -> AppResult<()> {
        let Some(record) = self.find_limited(email).await? else {
            log::warn!("No limited access row for {}, usage not recorded", email);
            return Ok(());
        };

        self.limited
            .update_cell(record.row_index, LAST_USED_COLUMN, &format_timestamp(now))
            .await
            .map_err(AppError::into_store_unavailable)?;

        log::debug!("Recorded use for {} at row {}", email, record.row_index);
        Ok(())
    }

    async fn find_limited(&self, email: &str) -> AppResult<Option<AccessRecord>> {
        let rows = self
            .limited
            .get_column(RECORD_RANGE)
            .await
            .map_err(AppError::into_store_unavailable)?;

        Ok(find_row(&rows, email).and_then(|index| AccessRecord::from_row(&rows[index], index + 1)))
    }

    async fn register(&self, email: &str, now: DateTime<Utc>) -> AppResult<()> {
        if !self.policy.allow_self_registration {
            log::info!("Access for {}: denied, not on any access list", email);
            return Err(AppError::NotAuthorized(
                "This account is not allowed to create quizzes".to_string(),
            ));
        }

        self.limited
            .append_row(vec![email.to_string(), format_timestamp(now)])
            .await
            .map_err(AppError::into_store_unavailable)?;

        log::info!("Registered {} on the limited access list", email);
        Ok(())
    }
}

/// Index of the first row whose first cell equals `email`.
fn find_row(rows: &[Vec<String>], email: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.first().map(String::as_str) == Some(email))
}
