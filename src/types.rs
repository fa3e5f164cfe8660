//! Core data types for bundles, books, formats and query results.
//!
//! This module defines the canonical shapes every catalog source is normalized into:
//!
//! - [`Bundle`] - One purchased collection of books from a single source
//! - [`Book`] - A book inside a bundle with its download formats
//! - [`Format`] - A downloadable file representation of a book
//! - [`SourceKind`] - Which catalog a bundle came from
//! - [`BundleDetail`] - The record backing the per-bundle detail view
//! - [`SearchHit`] - A bundle plus the subset of its books matching a search term
//! - [`Stats`] - Aggregate counts for the listing view
//! - [`Listing`] - Everything the listing view needs in one value
//!
//! All types serialize with the field names the presentation layer expects
//! (`purchaseDate`, `numBooks`, `amountSpent`, ...).
//!
//! # Examples
//!
//! ```rust
//! use kura::types::*;
//!
//! let mut formats = Formats::new();
//! formats.insert(Format::new("EPUB", 2.5));
//! formats.insert(Format::new("PDF", 8.0));
//!
//! let book = Book {
//!     title: "Dune".to_string(),
//!     formats,
//!     ..Default::default()
//! };
//! assert_eq!(book.formats.names(), vec!["EPUB", "PDF"]);
//! ```

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::query::ListingQuery;

/// The catalog a bundle originates from.
///
/// Bundle ids are only unique within one source, so global identity is the
/// pair `(source, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Humble,
    Fanatical,
}

impl SourceKind {
    /// Lowercase identifier used in query parameters and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Humble => "humble",
            SourceKind::Fanatical => "fanatical",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A downloadable file representation of a book.
///
/// # Fields
///
/// * `format` - Format name, e.g. `"EPUB"` or `"PDF"`
/// * `size` - Size in megabytes, `0.0` when the source size was unparseable
/// * `download_urls` - Download URL per channel (`"web"`, `"bittorrent"`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub format: String,
    #[serde(default)]
    pub size: f64,
    #[serde(default)]
    pub download_urls: BTreeMap<String, String>,
}

impl Format {
    /// Creates a format with no download URLs.
    pub fn new(format: impl Into<String>, size: f64) -> Self {
        Self {
            format: format.into(),
            size,
            download_urls: BTreeMap::new(),
        }
    }

    /// Adds a download URL under the given channel.
    pub fn with_url(mut self, channel: impl Into<String>, url: impl Into<String>) -> Self {
        self.download_urls.insert(channel.into(), url.into());
        self
    }
}

/// Formats of one book keyed by format name, in first-insertion order.
///
/// Inserting a format whose name is already present replaces the earlier
/// entry in place, so the last occurrence of a name wins.
///
/// Serializes as a JSON object `{ "<format name>": Format, ... }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formats(Vec<Format>);

impl Formats {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts a format, replacing any existing entry with the same name.
    pub fn insert(&mut self, format: Format) {
        match self.0.iter_mut().find(|f| f.format == format.format) {
            Some(slot) => *slot = format,
            None => self.0.push(format),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Format> {
        self.0.iter().find(|f| f.format == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Format> {
        self.0.iter()
    }

    /// Format names in mapping order.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|f| f.format.clone()).collect()
    }
}

impl FromIterator<Format> for Formats {
    fn from_iter<I: IntoIterator<Item = Format>>(iter: I) -> Self {
        let mut formats = Formats::new();
        for format in iter {
            formats.insert(format);
        }
        formats
    }
}

impl Serialize for Formats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for format in &self.0 {
            map.serialize_entry(&format.format, format)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Formats {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FormatsVisitor;

        impl<'de> Visitor<'de> for FormatsVisitor {
            type Value = Formats;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of format name to format")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Formats, A::Error> {
                let mut formats = Formats::new();
                while let Some((name, mut format)) = access.next_entry::<String, Format>()? {
                    // The key is authoritative
                    format.format = name;
                    formats.insert(format);
                }
                Ok(formats)
            }
        }

        deserializer.deserialize_map(FormatsVisitor)
    }
}

/// A book inside a bundle.
///
/// Optional metadata is `None` whenever the source does not provide it;
/// Fanatical catalogs never carry authors, publisher, description or ISBN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub authors: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    #[serde(default)]
    pub downloaded: bool,
    pub icon: Option<String>,
    #[serde(default)]
    pub formats: Formats,
}

/// One purchased collection of books, in canonical form.
///
/// Produced by a [`Source`](crate::source::Source) normalizer. For Humble
/// bundles `num_books` is the count reported by the catalog and may differ
/// from `books.len()`; for Fanatical bundles it is always `books.len()`.
///
/// The trailing `raw_purchase_date`, `total_spent` and `internal_id` fields
/// are Fanatical pass-through values used by the detail view; they are
/// `None` for Humble bundles and omitted from serialized output when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub id: String,
    pub name: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub num_books: u64,
    pub downloaded: bool,
    pub gamekey: Option<String>,
    pub amount_spent: Option<String>,
    pub source: SourceKind,
    pub cover: Option<String>,
    #[serde(default)]
    pub books: Vec<Book>,

    #[serde(rename = "purchase_date", default, skip_serializing_if = "Option::is_none")]
    pub raw_purchase_date: Option<String>,

    #[serde(rename = "total_spent", default, skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<String>,

    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<String>,

    /// The pass-through purchase date, parsed. Never serialized.
    #[serde(skip)]
    pub recorded_purchase_date: Option<DateTime<Utc>>,
}

impl Bundle {
    /// Purchase timestamp in milliseconds, `0` when unknown.
    pub fn purchase_millis(&self) -> i64 {
        self.purchase_date
            .map(|date| date.timestamp_millis())
            .unwrap_or(0)
    }

    /// Canonical purchase date, falling back to the recorded source date.
    ///
    /// Fanatical bundles list with a null `purchaseDate` but still carry the
    /// date their catalog recorded; search hits and detail views show it.
    pub fn known_purchase_date(&self) -> Option<DateTime<Utc>> {
        self.purchase_date.or(self.recorded_purchase_date)
    }
}

/// The record backing the per-bundle detail view.
///
/// `gamekey` holds the source's secondary identifier: the Humble gamekey, or
/// the internal `_id` for Fanatical bundles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDetail {
    pub id: String,
    pub name: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub num_books: u64,
    pub downloaded: bool,
    pub gamekey: Option<String>,
    pub amount_spent: Option<String>,
    pub books: Vec<Book>,
    pub source: SourceKind,
    pub cover: Option<String>,
}

/// A book that matched a search term: its title and format names only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingBook {
    pub title: String,
    pub formats: Vec<String>,
}

/// A bundle containing at least one book whose title matched a search term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub num_books: u64,
    pub downloaded: bool,
    pub matching_books: Vec<MatchingBook>,
    pub source: SourceKind,
}

/// Aggregate counts shown alongside the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_bundles: u64,
    pub book_bundles: u64,
    pub downloaded_bundles: u64,
}

/// Result of a listing query.
///
/// `query` echoes the effective (parsed, defaulted) parameters so the caller
/// can re-render its filter controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub bundles: Vec<Bundle>,
    pub stats: Stats,
    pub search_results: Option<Vec<SearchHit>>,
    pub query: ListingQuery,
}
