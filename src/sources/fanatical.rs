//! Fanatical catalog normalization.

use serde_json::Value;

use crate::{
    json::{self, keys},
    source::Source,
    types::{Book, Bundle, BundleDetail, Format, SourceKind},
};

/// Download channel every Fanatical file URL is filed under.
pub const WEB_CHANNEL: &str = "web";

/// Fanatical-style catalog source.
///
/// Fanatical records need real restructuring: `slug`/`_id` become the id,
/// each book's `files` list becomes its format mapping, and `total_spent`
/// is converted from integer cents.
///
/// # Examples
///
/// ```rust
/// use kura::prelude::*;
/// use kura::sources::FanaticalSource;
/// use serde_json::json;
///
/// let raw = json!({
///     "_id": "5f1a",
///     "name": "Cyberpunk Bundle",
///     "total_spent": "500",
///     "books": [{
///         "name": "Neuromancer",
///         "files": [{ "format": "EPUB", "size_MB": 1.2, "api_download": "https://dl/1" }]
///     }]
/// });
///
/// let bundle = FanaticalSource.normalize(&raw);
/// assert_eq!(bundle.id, "5f1a");
/// assert_eq!(bundle.num_books, 1);
/// assert_eq!(bundle.total_spent.as_deref(), Some("5.00"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FanaticalSource;

impl Source for FanaticalSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fanatical
    }

    fn name(&self) -> &'static str {
        "Fanatical"
    }

    fn bundle_id(&self, raw: &Value) -> Option<String> {
        json::string(raw, keys::SLUG_OR_ID)
    }

    fn normalize(&self, raw: &Value) -> Bundle {
        let books: Vec<Book> = json::array(raw, keys::BOOKS).iter().map(book).collect();

        Bundle {
            id: self.bundle_id(raw).unwrap_or_default(),
            name: json::string_or_empty(raw, keys::NAME),
            purchase_date: None,
            num_books: books.len() as u64,
            downloaded: json::flag(raw, keys::DOWNLOADED),
            gamekey: None,
            amount_spent: None,
            source: SourceKind::Fanatical,
            cover: json::string(raw, keys::COVER),
            books,
            raw_purchase_date: json::string(raw, keys::FANATICAL_PURCHASE_DATE),
            total_spent: json::lookup(raw, keys::TOTAL_SPENT).and_then(normalize_cents),
            internal_id: json::string(raw, keys::INTERNAL_ID),
            recorded_purchase_date: json::timestamp(raw, keys::FANATICAL_PURCHASE_DATE),
        }
    }

    fn detail(&self, raw: &Value) -> BundleDetail {
        let bundle = self.normalize(raw);
        let purchase_date = bundle.known_purchase_date();
        BundleDetail {
            id: bundle.id,
            name: bundle.name,
            purchase_date,
            num_books: bundle.num_books,
            downloaded: bundle.downloaded,
            gamekey: bundle.internal_id,
            amount_spent: bundle.total_spent,
            books: bundle.books,
            source: SourceKind::Fanatical,
            cover: bundle.cover,
        }
    }
}

fn book(raw: &Value) -> Book {
    Book {
        title: json::string_or_empty(raw, keys::NAME),
        authors: None,
        publisher: None,
        description: None,
        isbn: None,
        downloaded: false,
        icon: json::string(raw, keys::COVER),
        // Repeated format names collapse, last file wins
        formats: json::array(raw, keys::FILES).iter().filter_map(file).collect(),
    }
}

fn file(raw: &Value) -> Option<Format> {
    let mut format = Format::new(
        json::string(raw, keys::FORMAT)?,
        size_mb(json::lookup(raw, keys::SIZE_MB)),
    );
    if let Some(url) = json::string(raw, keys::API_DOWNLOAD) {
        format.download_urls.insert(WEB_CHANNEL.to_string(), url);
    }
    Some(format)
}

fn size_mb(raw: Option<&Value>) -> f64 {
    match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Normalizes a spent amount recorded in integer cents.
///
/// An all-digit string or a number without a fractional part is divided by
/// 100 and rendered with two decimals. Any other string or number is passed
/// through as text. Empty strings and non-scalar values yield `None`.
///
/// # Examples
///
/// ```rust
/// use kura::sources::fanatical::normalize_cents;
/// use serde_json::json;
///
/// assert_eq!(normalize_cents(&json!("500")).as_deref(), Some("5.00"));
/// assert_eq!(normalize_cents(&json!(1999)).as_deref(), Some("19.99"));
/// assert_eq!(normalize_cents(&json!("5.00")).as_deref(), Some("5.00"));
/// assert_eq!(normalize_cents(&json!(4.5)).as_deref(), Some("4.5"));
/// ```
pub fn normalize_cents(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) if s.bytes().all(|b| b.is_ascii_digit()) => match s.parse::<u128>() {
            Ok(cents) => Some(format_cents(false, cents)),
            Err(_) => Some(s.clone()),
        },
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(cents) = n.as_u64() {
                Some(format_cents(false, u128::from(cents)))
            } else if let Some(cents) = n.as_i64() {
                Some(format_cents(cents < 0, u128::from(cents.unsigned_abs())))
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
                        Some(format_cents(f < 0.0, f.abs() as u128))
                    }
                    _ => Some(n.to_string()),
                }
            }
        }
        _ => None,
    }
}

fn format_cents(negative: bool, cents: u128) -> String {
    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}
