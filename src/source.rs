//! Source trait and aggregation across catalog sources.
//!
//! Each catalog source implements [`Source`], which turns one raw,
//! source-shaped bundle record into the canonical [`Bundle`] and into the
//! [`BundleDetail`] record used by the detail view. [`normalizer_for`] selects
//! the implementation by [`SourceKind`], and [`aggregate`] concatenates the
//! normalized bundles of the sources chosen by a [`SourceFilter`].
//!
//! # Examples
//!
//! ```rust
//! use kura::prelude::*;
//! use serde_json::json;
//!
//! let raw = json!({ "slug": "sci-fi-bundle", "name": "Sci-Fi Bundle", "books": [] });
//! let bundle = normalizer_for(SourceKind::Fanatical).normalize(&raw);
//!
//! assert_eq!(bundle.id, "sci-fi-bundle");
//! assert_eq!(bundle.source, SourceKind::Fanatical);
//! ```

use serde_json::Value;

use crate::{
    query::SourceFilter,
    sources::{FanaticalSource, HumbleSource},
    types::{Bundle, BundleDetail, SourceKind},
};

/// Trait that every catalog source implements.
///
/// Implementations are pure: they never fail and substitute defaults for
/// missing or malformed fields.
///
/// # Required Methods
///
/// * [`kind()`](Source::kind) - Which catalog this source reads
/// * [`name()`](Source::name) - Human-readable name
/// * [`bundle_id()`](Source::bundle_id) - Identity of a raw bundle record
/// * [`normalize()`](Source::normalize) - Raw record to canonical [`Bundle`]
/// * [`detail()`](Source::detail) - Raw record to [`BundleDetail`]
pub trait Source: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn name(&self) -> &'static str;

    /// Returns the identifier a raw bundle is looked up by, if it has one.
    fn bundle_id(&self, raw: &Value) -> Option<String>;

    /// Maps one raw bundle record into canonical form.
    fn normalize(&self, raw: &Value) -> Bundle;

    /// Builds the detail view record for one raw bundle.
    fn detail(&self, raw: &Value) -> BundleDetail;

    /// Normalizes every record, preserving order.
    fn normalize_all(&self, raws: &[Value]) -> Vec<Bundle> {
        raws.iter().map(|raw| self.normalize(raw)).collect()
    }

    /// Finds the first raw record whose identifier equals `id`.
    fn find<'a>(&self, raws: &'a [Value], id: &str) -> Option<&'a Value> {
        raws.iter()
            .find(|raw| self.bundle_id(raw).as_deref() == Some(id))
    }
}

static HUMBLE: HumbleSource = HumbleSource;
static FANATICAL: FanaticalSource = FanaticalSource;

/// Returns the normalizer for a source kind.
pub fn normalizer_for(kind: SourceKind) -> &'static dyn Source {
    match kind {
        SourceKind::Humble => &HUMBLE,
        SourceKind::Fanatical => &FANATICAL,
    }
}

/// Concatenates normalized bundles from the sources selected by `filter`.
///
/// For [`SourceFilter::Both`] Humble bundles come first, then Fanatical
/// bundles, each in their catalog order.
pub fn aggregate(humble: &[Bundle], fanatical: &[Bundle], filter: SourceFilter) -> Vec<Bundle> {
    match filter {
        SourceFilter::Humble => humble.to_vec(),
        SourceFilter::Fanatical => fanatical.to_vec(),
        SourceFilter::Both => humble.iter().chain(fanatical).cloned().collect(),
    }
}
