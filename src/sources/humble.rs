//! Humble catalog normalization.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{
    json::{self, keys},
    source::Source,
    types::{Book, Bundle, BundleDetail, Format, SourceKind},
};

static SIZE_MB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.?\d*)\s*MB").expect("size pattern is valid"));

/// Humble-style catalog source.
///
/// Humble records are already close to canonical; normalization renames
/// fields and parses purchase dates and `"<number> MB"` sizes. No unit
/// conversion is applied to `amount_spent`.
///
/// # Examples
///
/// ```rust
/// use kura::prelude::*;
/// use kura::sources::HumbleSource;
/// use serde_json::json;
///
/// let raw = json!({
///     "machine_name": "b1",
///     "human_name": "Bundle One",
///     "Number of books": 2,
///     "downloaded": true,
///     "books": [{ "Book Title": "Alpha" }]
/// });
///
/// let bundle = HumbleSource.normalize(&raw);
/// assert_eq!(bundle.name, "Bundle One");
/// assert_eq!(bundle.num_books, 2);
/// assert_eq!(bundle.books.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HumbleSource;

impl Source for HumbleSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Humble
    }

    fn name(&self) -> &'static str {
        "Humble Bundle"
    }

    fn bundle_id(&self, raw: &Value) -> Option<String> {
        json::string(raw, keys::MACHINE_NAME)
    }

    fn normalize(&self, raw: &Value) -> Bundle {
        Bundle {
            id: json::string_or_empty(raw, keys::MACHINE_NAME),
            name: json::string_or_empty(raw, keys::HUMAN_NAME),
            purchase_date: json::timestamp(raw, keys::PURCHASE_DATE),
            // Reported count, not books.len()
            num_books: json::count(raw, keys::NUMBER_OF_BOOKS),
            downloaded: json::flag(raw, keys::DOWNLOADED),
            gamekey: json::string(raw, keys::GAMEKEY),
            amount_spent: json::string(raw, keys::AMOUNT_SPENT),
            source: SourceKind::Humble,
            cover: json::string(raw, keys::COVER),
            books: json::array(raw, keys::BOOKS).iter().map(book).collect(),
            raw_purchase_date: None,
            total_spent: None,
            internal_id: None,
            recorded_purchase_date: None,
        }
    }

    fn detail(&self, raw: &Value) -> BundleDetail {
        let bundle = self.normalize(raw);
        BundleDetail {
            id: bundle.id,
            name: bundle.name,
            purchase_date: bundle.purchase_date,
            num_books: bundle.num_books,
            downloaded: bundle.downloaded,
            gamekey: bundle.gamekey,
            amount_spent: bundle.amount_spent,
            books: bundle.books,
            source: SourceKind::Humble,
            cover: bundle.cover,
        }
    }
}

fn book(raw: &Value) -> Book {
    Book {
        title: json::string_or_empty(raw, keys::BOOK_TITLE),
        authors: json::string(raw, keys::AUTHORS),
        publisher: json::string(raw, keys::PUBLISHER),
        description: json::string(raw, keys::DESCRIPTION),
        isbn: json::string(raw, keys::ISBN),
        downloaded: json::flag(raw, keys::DOWNLOADED),
        icon: json::string(raw, keys::ICON),
        formats: json::array(raw, keys::AVAILABLE_FORMATS)
            .iter()
            .filter_map(format)
            .collect(),
    }
}

fn format(raw: &Value) -> Option<Format> {
    let name = json::string(raw, keys::FORMAT)?;
    let download_urls: BTreeMap<String, String> = json::lookup(raw, keys::DOWNLOAD_URLS)
        .and_then(Value::as_object)
        .map(|urls| {
            urls.iter()
                .filter_map(|(channel, url)| Some((channel.clone(), url.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default();

    Some(Format {
        format: name,
        size: parse_size(json::lookup(raw, keys::SIZE)),
        download_urls,
    })
}

/// Parses a Humble size value such as `"12.4 MB"` into megabytes.
///
/// A bare JSON number is taken as megabytes already. Anything else,
/// including a missing value, is `0.0`.
pub fn parse_size(raw: Option<&Value>) -> f64 {
    match raw {
        Some(Value::String(s)) => SIZE_MB
            .captures(s)
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0.0),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}
