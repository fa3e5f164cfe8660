//! Loading the raw catalog documents.
//!
//! Two documents back the library:
//!
//! - the Humble catalog, `{ "bundles": [...], "All Bundles": n, "Book Bundles": n }`
//! - the Fanatical catalog, `{ "bundles": [...] }`
//!
//! Bundle records are kept as raw [`Value`]s; turning them into canonical
//! bundles is the job of the [`Source`](crate::source::Source) normalizers.
//! Documents are read fresh on every call, nothing is cached.
//!
//! A Humble document that cannot be read or parsed is an [`Error::Load`].
//! The Fanatical document is optional: [`FanaticalCatalog::load_or_empty`]
//! treats any failure as an empty catalog.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

use crate::{
    error::{Error, Result},
    json::{self, keys},
    source::normalizer_for,
    types::{Bundle, SourceKind},
};

/// Precomputed bundle counts stored in the Humble catalog document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogTotals {
    pub all_bundles: u64,
    pub book_bundles: u64,
}

#[derive(Debug, Deserialize)]
struct RawHumbleDocument {
    bundles: Vec<Value>,
    #[serde(flatten)]
    rest: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawFanaticalDocument {
    #[serde(default)]
    bundles: Option<Vec<Value>>,
}

/// The parsed Humble catalog document.
#[derive(Debug, Clone, Default)]
pub struct HumbleCatalog {
    pub bundles: Vec<Value>,
    pub totals: CatalogTotals,
}

impl HumbleCatalog {
    /// Builds a catalog from an already parsed document.
    ///
    /// # Errors
    ///
    /// [`Error::Load`] when the document is not an object with a `bundles` array.
    pub fn from_value(document: Value) -> Result<Self> {
        let raw: RawHumbleDocument = serde_json::from_value(document)
            .map_err(|e| Error::load(SourceKind::Humble.as_str(), e.to_string()))?;
        let rest = Value::Object(raw.rest);

        Ok(Self {
            bundles: raw.bundles,
            totals: CatalogTotals {
                all_bundles: json::count(&rest, keys::ALL_BUNDLES),
                book_bundles: json::count(&rest, keys::BOOK_BUNDLES),
            },
        })
    }

    /// Parses a catalog from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| Error::load(SourceKind::Humble.as_str(), e.to_string()))?;
        Self::from_value(document)
    }

    /// Reads and parses the catalog at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Load`] when the file is missing, unreadable or malformed.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = read(SourceKind::Humble, path).await?;
        let catalog = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            bundles = catalog.bundles.len(),
            "loaded humble catalog"
        );
        Ok(catalog)
    }

    /// Normalizes every bundle record, in document order.
    pub fn normalized(&self) -> Vec<Bundle> {
        normalizer_for(SourceKind::Humble).normalize_all(&self.bundles)
    }
}

/// The parsed Fanatical catalog document.
#[derive(Debug, Clone, Default)]
pub struct FanaticalCatalog {
    pub bundles: Vec<Value>,
}

impl FanaticalCatalog {
    /// Builds a catalog from an already parsed document. A missing
    /// `bundles` field is an empty catalog.
    ///
    /// # Errors
    ///
    /// [`Error::Load`] when the document is not an object or `bundles` is not an array.
    pub fn from_value(document: Value) -> Result<Self> {
        let raw: RawFanaticalDocument = serde_json::from_value(document)
            .map_err(|e| Error::load(SourceKind::Fanatical.as_str(), e.to_string()))?;
        Ok(Self {
            bundles: raw.bundles.unwrap_or_default(),
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| Error::load(SourceKind::Fanatical.as_str(), e.to_string()))?;
        Self::from_value(document)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let text = read(SourceKind::Fanatical, path).await?;
        let catalog = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            bundles = catalog.bundles.len(),
            "loaded fanatical catalog"
        );
        Ok(catalog)
    }

    /// Loads the catalog, treating any failure as an empty catalog.
    pub async fn load_or_empty(path: &Path) -> Self {
        match Self::load(path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "skipping fanatical catalog");
                Self::default()
            }
        }
    }

    pub fn normalized(&self) -> Vec<Bundle> {
        normalizer_for(SourceKind::Fanatical).normalize_all(&self.bundles)
    }
}

async fn read(kind: SourceKind, path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::load(kind.as_str(), format!("{}: {}", path.display(), e)))
}
