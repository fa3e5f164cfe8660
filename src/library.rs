//! The library facade: per-call loading plus the listing and detail pipelines.
//!
//! [`Library`] holds only configuration. Every call re-reads both catalog
//! documents, so concurrent calls share no state and always see the files as
//! they are on disk at that moment.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kura::prelude::*;
//! use std::collections::HashMap;
//!
//! # async fn example() -> kura::Result<()> {
//! let library = Library::new(LibraryConfig::from_env());
//!
//! let mut params = HashMap::new();
//! params.insert("sort".to_string(), "date".to_string());
//! params.insert("sortDir".to_string(), "desc".to_string());
//!
//! let listing = library.listing(&ListingQuery::from_params(&params)).await?;
//! println!("{} bundles", listing.bundles.len());
//!
//! match library.bundle("some_machine_name").await? {
//!     Some(detail) => println!("{} ({} books)", detail.name, detail.books.len()),
//!     None => println!("not found"),
//! }
//! # Ok(())
//! # }
//! ```

use futures::future;

use crate::{
    catalog::{FanaticalCatalog, HumbleCatalog},
    config::LibraryConfig,
    error::Result,
    query::ListingQuery,
    resolve::resolve_bundle,
    search::{filter_and_sort, search},
    source::aggregate,
    stats::compute_stats,
    types::{BundleDetail, Listing},
};

/// Entry point for listing and detail queries.
#[derive(Debug, Clone, Default)]
pub struct Library {
    config: LibraryConfig,
}

impl Library {
    pub fn new(config: LibraryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Runs a listing query.
    ///
    /// Both documents are read concurrently. A missing or malformed
    /// Fanatical document counts as an empty catalog.
    ///
    /// # Errors
    ///
    /// [`Error::Load`](crate::Error::Load) when the Humble document cannot be
    /// read or parsed.
    pub async fn listing(&self, query: &ListingQuery) -> Result<Listing> {
        let (humble, fanatical) = future::join(
            HumbleCatalog::load(&self.config.humble_path),
            FanaticalCatalog::load_or_empty(&self.config.fanatical_path),
        )
        .await;

        Ok(build_listing(&humble?, &fanatical, query))
    }

    /// Resolves one bundle for the detail view.
    ///
    /// The Fanatical document is only read when the id is not a Humble
    /// bundle, and failing to read it yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`Error::Load`](crate::Error::Load) when the Humble document cannot be
    /// read or parsed.
    pub async fn bundle(&self, id: &str) -> Result<Option<BundleDetail>> {
        let humble = HumbleCatalog::load(&self.config.humble_path).await?;
        if let Some(detail) = resolve_bundle(&humble, None, id) {
            return Ok(Some(detail));
        }

        let fanatical = match FanaticalCatalog::load(&self.config.fanatical_path).await {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                tracing::warn!(error = %e, "skipping fanatical catalog");
                None
            }
        };
        Ok(resolve_bundle(&humble, fanatical.as_ref(), id))
    }
}

/// Runs the listing pipeline over already loaded catalogs.
///
/// Normalize, aggregate by source filter, filter by downloaded state, stable
/// sort, compute stats, and search both catalogs when a term is present.
pub fn build_listing(
    humble: &HumbleCatalog,
    fanatical: &FanaticalCatalog,
    query: &ListingQuery,
) -> Listing {
    let humble_bundles = humble.normalized();
    let fanatical_bundles = fanatical.normalized();

    let bundles = filter_and_sort(
        aggregate(&humble_bundles, &fanatical_bundles, query.filter_source),
        query.filter_downloaded,
        query.sort,
        query.sort_dir,
    );
    let stats = compute_stats(
        query.filter_source,
        &humble.totals,
        &fanatical_bundles,
        &bundles,
    );
    let search_results = query
        .search_term()
        .map(|term| search(term, &humble_bundles, &fanatical_bundles));

    tracing::debug!(
        humble = humble_bundles.len(),
        fanatical = fanatical_bundles.len(),
        listed = bundles.len(),
        hits = ?search_results.as_ref().map(Vec::len),
        "built listing"
    );

    Listing {
        bundles,
        stats,
        search_results,
        query: query.clone(),
    }
}
