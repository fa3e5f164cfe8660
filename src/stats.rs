//! Aggregate counts for the listing view.

use crate::{
    catalog::CatalogTotals,
    query::SourceFilter,
    types::{Bundle, Stats},
};

/// Computes listing stats for the active source filter.
///
/// * `humble` - Totals stored in the Humble catalog document; these are
///   reported as-is, never recounted from the bundle list
/// * `fanatical` - All normalized Fanatical bundles; each one counts as a
///   book bundle
/// * `filtered` - The listing after source and downloaded filtering
///
/// `downloaded_bundles` counts downloaded bundles in `filtered`, so it is
/// always `0` under [`DownloadedFilter::NotDownloaded`] and equals
/// `filtered.len()` under [`DownloadedFilter::Downloaded`].
///
/// [`DownloadedFilter::NotDownloaded`]: crate::query::DownloadedFilter::NotDownloaded
/// [`DownloadedFilter::Downloaded`]: crate::query::DownloadedFilter::Downloaded
pub fn compute_stats(
    filter: SourceFilter,
    humble: &CatalogTotals,
    fanatical: &[Bundle],
    filtered: &[Bundle],
) -> Stats {
    let fanatical_count = fanatical.len() as u64;
    let (total_bundles, book_bundles) = match filter {
        SourceFilter::Humble => (humble.all_bundles, humble.book_bundles),
        SourceFilter::Fanatical => (fanatical_count, fanatical_count),
        SourceFilter::Both => (
            humble.all_bundles.saturating_add(fanatical_count),
            humble.book_bundles.saturating_add(fanatical_count),
        ),
    };

    Stats {
        total_bundles,
        book_bundles,
        downloaded_bundles: filtered.iter().filter(|b| b.downloaded).count() as u64,
    }
}
