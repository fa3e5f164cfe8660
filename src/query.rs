//! Listing query parameters and their parsing.
//!
//! The presentation layer hands the engine an untyped string map
//! (`filterSource`, `filterDownloaded`, `sort`, `sortDir`, `bookSearch`).
//! [`ListingQuery::from_params`] turns that map into typed values, falling
//! back to the default for anything absent or unrecognised.
//!
//! # Examples
//!
//! ```rust
//! use kura::query::*;
//! use std::collections::HashMap;
//!
//! let mut params = HashMap::new();
//! params.insert("filterSource".to_string(), "fanatical".to_string());
//! params.insert("sortDir".to_string(), "desc".to_string());
//!
//! let query = ListingQuery::from_params(&params);
//! assert_eq!(query.filter_source, SourceFilter::Fanatical);
//! assert_eq!(query.sort, SortKey::Name);
//! assert_eq!(query.sort_dir, SortDir::Desc);
//! assert_eq!(query.book_search, None);
//! ```

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const PARAM_FILTER_SOURCE: &str = "filterSource";
pub const PARAM_FILTER_DOWNLOADED: &str = "filterDownloaded";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_SORT_DIR: &str = "sortDir";
pub const PARAM_BOOK_SEARCH: &str = "bookSearch";

/// Which catalogs contribute bundles to the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    Humble,
    Fanatical,
    #[default]
    Both,
}

/// Downloaded-state predicate applied before sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadedFilter {
    #[default]
    All,
    Downloaded,
    NotDownloaded,
}

/// Sort key for the listing.
///
/// * `Name` - Locale-style string collation of bundle names
/// * `Date` - Purchase timestamp, unknown dates count as the epoch
/// * `Downloaded` - Downloaded bundles first when ascending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Date,
    Downloaded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

macro_rules! query_enum {
    ($ty:ident, $param:expr, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err(Error::invalid_parameter($param, other)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

query_enum!(SourceFilter, PARAM_FILTER_SOURCE, {
    Humble => "humble",
    Fanatical => "fanatical",
    Both => "both",
});

query_enum!(DownloadedFilter, PARAM_FILTER_DOWNLOADED, {
    All => "all",
    Downloaded => "downloaded",
    NotDownloaded => "not-downloaded",
});

query_enum!(SortKey, PARAM_SORT, {
    Name => "name",
    Date => "date",
    Downloaded => "downloaded",
});

query_enum!(SortDir, PARAM_SORT_DIR, {
    Asc => "asc",
    Desc => "desc",
});

/// Typed parameters of a listing query.
///
/// Built either from the raw parameter map with
/// [`from_params`](ListingQuery::from_params) or programmatically through the
/// generated `ListingQueryBuilder`:
///
/// ```rust
/// use kura::query::{ListingQueryBuilder, SortKey, SourceFilter};
///
/// let query = ListingQueryBuilder::default()
///     .filter_source(SourceFilter::Humble)
///     .sort(SortKey::Date)
///     .book_search("dune")
///     .build()
///     .unwrap();
///
/// assert_eq!(query.book_search.as_deref(), Some("dune"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[builder(default, setter(into))]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub filter_source: SourceFilter,
    pub filter_downloaded: DownloadedFilter,
    pub sort: SortKey,
    pub sort_dir: SortDir,
    /// Book title search term; `None` means no search.
    #[builder(setter(into, strip_option))]
    pub book_search: Option<String>,
}

impl ListingQuery {
    /// Parses the raw query parameter map.
    ///
    /// Absent parameters take their default. Unrecognised values are logged
    /// and also fall back to the default. An empty `bookSearch` means no
    /// search.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let book_search = params
            .get(PARAM_BOOK_SEARCH)
            .filter(|term| !term.is_empty())
            .cloned();

        Self {
            filter_source: param_or_default(params, PARAM_FILTER_SOURCE),
            filter_downloaded: param_or_default(params, PARAM_FILTER_DOWNLOADED),
            sort: param_or_default(params, PARAM_SORT),
            sort_dir: param_or_default(params, PARAM_SORT_DIR),
            book_search,
        }
    }

    /// The search term, when a non-empty one was supplied.
    pub fn search_term(&self) -> Option<&str> {
        self.book_search.as_deref().filter(|term| !term.is_empty())
    }
}

fn param_or_default<T>(params: &HashMap<String, String>, name: &str) -> T
where
    T: FromStr<Err = Error> + Default,
{
    match params.get(name) {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e: Error| {
            tracing::debug!(param = name, error = %e, "using default for query parameter");
            T::default()
        }),
    }
}
