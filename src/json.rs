//! Shape-tolerant field lookup over raw catalog JSON.
//!
//! Catalog records spell the same concept in more than one way (`purchase_date`
//! vs `"purchase date"`, `Authors` vs `Author`). Every such field is described
//! by an ordered list of candidate keys in [`keys`]; lookups return the value
//! of the first candidate that is present. A key counts as present when it
//! exists and holds something other than `null` or an empty string.
//!
//! # Examples
//!
//! ```rust
//! use kura::json::{self, keys};
//! use serde_json::json;
//!
//! let bundle = json!({
//!     "purchase date": "2021-03-04T10:00:00",
//!     "amount_spent": 12.5
//! });
//!
//! assert_eq!(
//!     json::string(&bundle, keys::PURCHASE_DATE).as_deref(),
//!     Some("2021-03-04T10:00:00")
//! );
//! assert_eq!(json::string(&bundle, keys::AMOUNT_SPENT).as_deref(), Some("12.5"));
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Ordered candidate keys per field, highest precedence first.
pub mod keys {
    pub const BUNDLES: &[&str] = &["bundles"];

    // Humble catalog document
    pub const ALL_BUNDLES: &[&str] = &["All Bundles"];
    pub const BOOK_BUNDLES: &[&str] = &["Book Bundles"];

    // Humble bundle
    pub const MACHINE_NAME: &[&str] = &["machine_name"];
    pub const HUMAN_NAME: &[&str] = &["human_name"];
    pub const PURCHASE_DATE: &[&str] = &["purchase_date", "purchase date"];
    pub const NUMBER_OF_BOOKS: &[&str] = &["Number of books"];
    pub const AMOUNT_SPENT: &[&str] = &["amount_spent", "amount spent"];
    pub const GAMEKEY: &[&str] = &["gamekey"];
    pub const COVER: &[&str] = &["cover"];
    pub const DOWNLOADED: &[&str] = &["downloaded"];
    pub const BOOKS: &[&str] = &["books"];

    // Humble book
    pub const BOOK_TITLE: &[&str] = &["Book Title", "title"];
    pub const AUTHORS: &[&str] = &["Authors", "Author"];
    pub const PUBLISHER: &[&str] = &["Publisher"];
    pub const DESCRIPTION: &[&str] = &["Description"];
    pub const ISBN: &[&str] = &["ISBN"];
    pub const ICON: &[&str] = &["icon"];
    pub const AVAILABLE_FORMATS: &[&str] = &["Available Formats"];
    pub const FORMAT: &[&str] = &["format"];
    pub const SIZE: &[&str] = &["size"];
    pub const DOWNLOAD_URLS: &[&str] = &["download_urls"];

    // Fanatical bundle
    pub const SLUG_OR_ID: &[&str] = &["slug", "_id"];
    pub const INTERNAL_ID: &[&str] = &["_id"];
    pub const NAME: &[&str] = &["name"];
    pub const FANATICAL_PURCHASE_DATE: &[&str] = &["purchase_date"];
    pub const TOTAL_SPENT: &[&str] = &["total_spent"];

    // Fanatical book and file
    pub const FILES: &[&str] = &["files"];
    pub const SIZE_MB: &[&str] = &["size_MB"];
    pub const API_DOWNLOAD: &[&str] = &["api_download"];
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Returns the value of the first present candidate key.
pub fn lookup<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_present(value))
}

/// Looks up a field as text. Numbers are rendered with their JSON spelling;
/// other non-string values count as absent.
pub fn string(record: &Value, candidates: &[&str]) -> Option<String> {
    match lookup(record, candidates)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`string`], but yields an empty string when absent.
pub fn string_or_empty(record: &Value, candidates: &[&str]) -> String {
    string(record, candidates).unwrap_or_default()
}

/// Looks up a non-negative count. Accepts integers, whole floats and numeric
/// strings; anything else is `0`.
pub fn count(record: &Value, candidates: &[&str]) -> u64 {
    match lookup(record, candidates) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// `true` only when the field is the JSON boolean `true`.
pub fn flag(record: &Value, candidates: &[&str]) -> bool {
    matches!(lookup(record, candidates), Some(Value::Bool(true)))
}

/// Looks up an array field; absent or non-array values yield an empty slice.
pub fn array<'a>(record: &'a Value, candidates: &[&str]) -> &'a [Value] {
    lookup(record, candidates)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Looks up a timestamp field, see [`parse_timestamp`].
pub fn timestamp(record: &Value, candidates: &[&str]) -> Option<DateTime<Utc>> {
    match lookup(record, candidates)? {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Parses a catalog timestamp.
///
/// Accepts RFC 3339, naive ISO date-times (with `T` or a space, optional
/// fractional seconds, read as UTC) and plain `YYYY-MM-DD` dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
