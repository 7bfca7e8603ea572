use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Outcome of a successful access check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Unlimited,
    Limited,
}

/// A row of the limited access sheet: `email | last used at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessRecord {
    pub email: String,
    pub last_used_at: Option<DateTime<Utc>>,
    /// 1-based row number in the backing sheet.
    pub row_index: usize,
}

impl AccessRecord {
    pub fn from_row(row: &[String], row_index: usize) -> Option<Self> {
        let email = row.first()?.clone();
        let last_used_at = row.get(1).and_then(|cell| parse_timestamp(cell));
        Some(Self {
            email,
            last_used_at,
            row_index,
        })
    }

    /// When this record may be used again, or `None` if it is usable now.
    ///
    /// A last-use so far ahead that the cooldown runs past the representable
    /// range keeps the record blocked until `DateTime::MAX_UTC`.
    pub fn cooldown_ends_at(
        &self,
        now: DateTime<Utc>,
        cooldown: chrono::Duration,
    ) -> Option<DateTime<Utc>> {
        let last = self.last_used_at?;
        let reopens = last
            .checked_add_signed(cooldown)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (now < reopens).then_some(reopens)
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Accepts RFC 3339 as well as the naive layouts sheets tend to hold,
/// which are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
