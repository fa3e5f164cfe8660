//! Filtering, sorting and title search over normalized bundles.
//!
//! Listing results go through [`filter_and_sort`]: a downloaded-state
//! predicate followed by a **stable** sort, so bundles that compare equal keep
//! the order the aggregator produced. The same steps are available as chained
//! methods through [`BundleListExt`].
//!
//! [`search`] is independent of the listing filters: it always looks at every
//! bundle of both catalogs.
//!
//! # Examples
//!
//! ```rust
//! use kura::prelude::*;
//! use serde_json::json;
//!
//! let humble = HumbleSource.normalize_all(&[
//!     json!({ "machine_name": "b", "human_name": "beta", "downloaded": true }),
//!     json!({ "machine_name": "a", "human_name": "Alpha" }),
//! ]);
//!
//! let sorted = humble
//!     .clone()
//!     .filter_downloaded(DownloadedFilter::All)
//!     .sort_bundles(SortKey::Name, SortDir::Asc);
//! assert_eq!(sorted[0].name, "Alpha");
//!
//! let downloaded = humble.filter_downloaded(DownloadedFilter::Downloaded);
//! assert_eq!(downloaded.len(), 1);
//! ```

use rayon::prelude::*;
use std::cmp::Ordering;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{
    query::{DownloadedFilter, SortDir, SortKey},
    types::{Book, Bundle, MatchingBook, SearchHit},
};

impl DownloadedFilter {
    /// Whether a bundle passes this filter.
    pub fn accepts(&self, bundle: &Bundle) -> bool {
        match self {
            DownloadedFilter::All => true,
            DownloadedFilter::Downloaded => bundle.downloaded,
            DownloadedFilter::NotDownloaded => !bundle.downloaded,
        }
    }
}

impl SortKey {
    /// Ascending comparison of two bundles under this key.
    ///
    /// Returns [`Ordering::Equal`] for equal keys; ordering between those is
    /// left to the stable sort.
    pub fn compare(&self, a: &Bundle, b: &Bundle) -> Ordering {
        match self {
            SortKey::Name => collate(&a.name, &b.name),
            SortKey::Date => a.purchase_millis().cmp(&b.purchase_millis()),
            // Downloaded first
            SortKey::Downloaded => b.downloaded.cmp(&a.downloaded),
        }
    }
}

/// Locale-style string comparison.
///
/// Strings are compared by base letters first, ignoring case and accents, so
/// `"Émile"` sorts with the `e`s. Ties are then broken by accents (unaccented
/// first) and finally by case (lowercase first). Identical strings are equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| decomposed(a).cmp(decomposed(b)))
        .then_with(|| {
            a.nfd()
                .zip(b.nfd())
                .map(|(x, y)| case_rank(x).cmp(&case_rank(y)))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    decomposed(s).filter(|c| !is_combining_mark(*c))
}

fn decomposed(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() { 1 } else { 0 }
}

/// Extension trait for chaining listing steps on a bundle list.
pub trait BundleListExt {
    /// Keeps only bundles accepted by `filter`.
    fn filter_downloaded(self, filter: DownloadedFilter) -> Self;

    /// Stable sort by `key` in direction `dir`.
    ///
    /// Descending order reverses the comparator, not the output, so bundles
    /// with equal keys stay in their incoming order either way.
    fn sort_bundles(self, key: SortKey, dir: SortDir) -> Self;
}

impl BundleListExt for Vec<Bundle> {
    fn filter_downloaded(mut self, filter: DownloadedFilter) -> Self {
        self.retain(|bundle| filter.accepts(bundle));
        self
    }

    fn sort_bundles(mut self, key: SortKey, dir: SortDir) -> Self {
        // slice::sort_by is stable
        self.sort_by(|a, b| match dir {
            SortDir::Asc => key.compare(a, b),
            SortDir::Desc => key.compare(a, b).reverse(),
        });
        self
    }
}

/// Applies the downloaded filter, then the stable sort.
pub fn filter_and_sort(
    bundles: Vec<Bundle>,
    downloaded: DownloadedFilter,
    key: SortKey,
    dir: SortDir,
) -> Vec<Bundle> {
    bundles.filter_downloaded(downloaded).sort_bundles(key, dir)
}

/// Case-insensitive substring search over book titles.
///
/// Searches Humble bundles, then Fanatical bundles, keeping catalog order.
/// A bundle is a hit when at least one of its books matches; the hit carries
/// only the matching books. Bundles without books never match.
pub fn search(term: &str, humble: &[Bundle], fanatical: &[Bundle]) -> Vec<SearchHit> {
    let needle = term.to_lowercase();

    humble
        .par_iter()
        .chain(fanatical.par_iter())
        .filter_map(|bundle| hit(bundle, &needle))
        .collect()
}

fn hit(bundle: &Bundle, needle: &str) -> Option<SearchHit> {
    let matching_books: Vec<MatchingBook> = bundle
        .books
        .iter()
        .filter(|book| book.title.to_lowercase().contains(needle))
        .map(matching_book)
        .collect();

    if matching_books.is_empty() {
        return None;
    }

    Some(SearchHit {
        id: bundle.id.clone(),
        name: bundle.name.clone(),
        purchase_date: bundle.known_purchase_date(),
        num_books: bundle.num_books,
        downloaded: bundle.downloaded,
        matching_books,
        source: bundle.source,
    })
}

fn matching_book(book: &Book) -> MatchingBook {
    MatchingBook {
        title: book.title.clone(),
        formats: book.formats.names(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;

    #[test]
    fn test_collate() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Banana", "apple"), Ordering::Greater);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("Same", "Same"), Ordering::Equal);
        assert_eq!(collate("abc", "abcd"), Ordering::Less);
        assert_eq!(collate("", "a"), Ordering::Less);
    }

    #[test]
    fn test_collate_folds_accents() {
        assert_eq!(collate("Émile", "Zebra"), Ordering::Less);
        assert_eq!(collate("émile", "Emily"), Ordering::Less);
        assert_eq!(collate("resume", "résumé"), Ordering::Less);
        assert_eq!(collate("résumé", "Résumé"), Ordering::Less);
        assert_eq!(collate("Ångström", "Ångström"), Ordering::Equal);
    }

    #[test]
    fn test_downloaded_filter_accepts() {
        let mut bundle = crate::sources::HumbleSource.normalize(&serde_json::json!({}));
        assert!(DownloadedFilter::All.accepts(&bundle));
        assert!(DownloadedFilter::NotDownloaded.accepts(&bundle));
        bundle.downloaded = true;
        assert!(DownloadedFilter::Downloaded.accepts(&bundle));
        assert!(!DownloadedFilter::NotDownloaded.accepts(&bundle));
    }
}
