//! # Kura - Unified e-book purchase catalog
//!
//! Kura merges two differently-shaped purchase catalogs (a Humble-style and a
//! Fanatical-style JSON document) into one consistent collection of bundles,
//! each holding books with their download formats, and answers the queries a
//! library front end needs: filtered and sorted listings, aggregate stats,
//! title search and single-bundle lookup.
//!
//! ## Features
//!
//! - **Normalization**: One canonical [`Bundle`]/[`Book`]/[`Format`] shape for both sources
//! - **Shape Tolerance**: Ordered key fallbacks and defaults instead of schema errors
//! - **Stable Sorting**: By name, purchase date or downloaded state, ascending or descending
//! - **Global Search**: Case-insensitive title search across both catalogs
//! - **Detail Lookup**: Humble-first resolution with Fanatical fallback
//! - **No Shared State**: Every query re-reads its documents; pure functions for everything else
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kura::prelude::*;
//! use kura::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let library = Library::new(LibraryConfig::from_env());
//!
//!     let query = ListingQueryBuilder::default()
//!         .filter_downloaded(DownloadedFilter::NotDownloaded)
//!         .sort(SortKey::Date)
//!         .sort_dir(SortDir::Desc)
//!         .build()
//!         .unwrap();
//!
//!     let listing = library.listing(&query).await?;
//!     println!("{} of {} bundles", listing.bundles.len(), listing.stats.total_bundles);
//!     Ok(())
//! }
//! ```
//!
//! ## Working Without Files
//!
//! Every stage takes parsed documents as explicit inputs:
//!
//! ```rust
//! use kura::prelude::*;
//! use serde_json::json;
//!
//! let humble = HumbleCatalog::from_value(json!({
//!     "bundles": [{
//!         "machine_name": "b1",
//!         "human_name": "Bundle One",
//!         "Number of books": 2,
//!         "downloaded": true,
//!         "books": [{ "Book Title": "Alpha" }]
//!     }],
//!     "All Bundles": 1,
//!     "Book Bundles": 1
//! }))
//! .unwrap();
//!
//! let listing = build_listing(&humble, &FanaticalCatalog::default(), &ListingQuery::default());
//! assert_eq!(listing.bundles[0].name, "Bundle One");
//! assert_eq!(listing.stats.total_bundles, 1);
//! ```
//!
//! ## Architecture
//!
//! - [`catalog`]: Loading the raw catalog documents
//! - [`json`]: Ordered key-fallback field lookup
//! - [`source`] / [`sources`]: The normalizer trait and its two implementations
//! - [`search`]: Filtering, stable sorting and title search
//! - [`stats`]: Listing statistics
//! - [`resolve`]: Detail view lookup
//! - [`library`]: The per-call pipelines
//! - [`query`]: Query parameter parsing
//! - [`error`]: Error handling

pub mod catalog;
pub mod config;
pub mod error;
pub mod json;
pub mod library;
pub mod query;
pub mod resolve;
pub mod search;
pub mod source;
pub mod sources;
pub mod stats;
pub mod types;

/// Prelude module for convenient imports.
///
/// Re-exports the catalog types, the normalizer trait and both sources,
/// the query types, the listing helpers and the [`Library`] facade.
pub mod prelude {
    pub use crate::{
        catalog::{CatalogTotals, FanaticalCatalog, HumbleCatalog},
        config::{LibraryConfig, LibraryConfigBuilder},
        library::{Library, build_listing},
        query::{DownloadedFilter, ListingQuery, ListingQueryBuilder, SortDir, SortKey, SourceFilter},
        resolve::resolve_bundle,
        search::{BundleListExt, filter_and_sort, search},
        source::{Source, aggregate, normalizer_for},
        sources::{FanaticalSource, HumbleSource},
        stats::compute_stats,
        types::{
            Book, Bundle, BundleDetail, Format, Formats, Listing, MatchingBook, SearchHit,
            SourceKind, Stats,
        },
    };
}

// Re-export main types at crate root for direct access
pub use error::{Error, Result};
pub use library::Library;
pub use types::{Book, Bundle, BundleDetail, Format, Listing, SearchHit, SourceKind, Stats};
