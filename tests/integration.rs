//! Integration tests for Kura
//!
//! End-to-end tests running the listing and detail pipelines against catalog
//! files on disk.

use kura::prelude::*;
use serde_json::json;
use std::collections::HashMap;

mod common;
use common::{
    fanatical_catalog, humble_catalog, setup_catalogs, write_raw_fanatical, write_raw_humble,
};

fn params(pairs: &[(&str, &str)]) -> ListingQuery {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ListingQuery::from_params(&map)
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_single_humble_bundle_listing() {
        let humble = json!({
            "bundles": [{
                "machine_name": "b1",
                "human_name": "Bundle One",
                "Number of books": 2,
                "downloaded": true,
                "books": [{ "Book Title": "Alpha" }]
            }]
        });
        let fanatical = json!({ "bundles": [] });
        let catalogs = setup_catalogs(Some(&humble), Some(&fanatical)).await;

        let library = Library::new(catalogs.config.clone());
        let listing = library
            .listing(&params(&[("filterSource", "both"), ("sort", "name")]))
            .await
            .unwrap();

        assert_eq!(listing.bundles.len(), 1);
        let bundle = &listing.bundles[0];
        assert_eq!(bundle.name, "Bundle One");
        assert_eq!(bundle.num_books, 2);
        assert!(bundle.downloaded);
        assert_eq!(bundle.books.len(), 1);
        assert!(listing.search_results.is_none());
    }

    #[tokio::test]
    async fn test_default_listing_merges_and_sorts() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), Some(&fanatical_catalog())).await;
        let library = Library::new(catalogs.config.clone());

        let listing = library.listing(&ListingQuery::default()).await.unwrap();
        let names: Vec<&str> = listing.bundles.iter().map(|b| b.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "art of Programming",
                "Bargain Bin",
                "Dune Collection",
                "Empty Bundle",
                "Sci-Fi Classics"
            ]
        );
        assert_eq!(listing.stats.total_bundles, 22);
        assert_eq!(listing.stats.book_bundles, 10);
        assert_eq!(listing.stats.downloaded_bundles, 2);
        assert_eq!(listing.query, ListingQuery::default());
    }

    #[tokio::test]
    async fn test_date_sort_descending() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), Some(&fanatical_catalog())).await;
        let library = Library::new(catalogs.config.clone());

        let listing = library
            .listing(&params(&[("sort", "date"), ("sortDir", "desc")]))
            .await
            .unwrap();
        let ids: Vec<&str> = listing.bundles.iter().map(|b| b.id.as_str()).collect();

        // Undated bundles (all Fanatical ones included) tie at the epoch and
        // keep their aggregated order at the end
        assert_eq!(
            ids,
            vec![
                "art_of_programming",
                "scifi_classics",
                "empty_bundle",
                "dune-collection",
                "60aa02"
            ]
        );
    }

    #[tokio::test]
    async fn test_fanatical_filter_with_missing_file() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), None).await;
        let library = Library::new(catalogs.config.clone());

        let listing = library
            .listing(&params(&[("filterSource", "fanatical")]))
            .await
            .unwrap();

        assert!(listing.bundles.is_empty());
        assert_eq!(listing.stats.total_bundles, 0);
        assert_eq!(listing.stats.book_bundles, 0);
        assert_eq!(listing.stats.downloaded_bundles, 0);
    }

    #[tokio::test]
    async fn test_malformed_fanatical_is_ignored() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), None).await;
        write_raw_fanatical(&catalogs, "{ this is not json").await;
        let library = Library::new(catalogs.config.clone());

        let listing = library.listing(&ListingQuery::default()).await.unwrap();
        assert_eq!(listing.bundles.len(), 3);
        assert_eq!(listing.stats.total_bundles, 20);
    }

    #[tokio::test]
    async fn test_missing_humble_is_a_load_error() {
        let catalogs = setup_catalogs(None, Some(&fanatical_catalog())).await;
        let library = Library::new(catalogs.config.clone());

        let err = library.listing(&ListingQuery::default()).await.unwrap_err();
        assert!(matches!(err, kura::Error::Load { ref src, .. } if src == "humble"));

        let err = library.bundle("dune-collection").await.unwrap_err();
        assert!(err.is_load());
    }

    #[tokio::test]
    async fn test_malformed_humble_is_a_load_error() {
        let catalogs = setup_catalogs(None, Some(&fanatical_catalog())).await;
        write_raw_humble(&catalogs, "[1, 2, 3").await;
        let library = Library::new(catalogs.config.clone());

        let err = library.listing(&ListingQuery::default()).await.unwrap_err();
        assert!(err.is_load());
        assert!(err.to_string().contains("humble"));
    }

    #[tokio::test]
    async fn test_search_is_global() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), Some(&fanatical_catalog())).await;
        let library = Library::new(catalogs.config.clone());

        let listing = library
            .listing(&params(&[("filterSource", "humble"), ("bookSearch", "DUNE")]))
            .await
            .unwrap();

        assert!(listing.bundles.iter().all(|b| b.source == SourceKind::Humble));

        let hits = listing.search_results.unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["scifi_classics", "dune-collection"]);

        assert_eq!(hits[0].matching_books.len(), 1);
        assert_eq!(hits[0].matching_books[0].title, "Dune Messiah");
        assert_eq!(hits[0].matching_books[0].formats, vec!["EPUB", "PDF"]);

        let fanatical_titles: Vec<&str> = hits[1]
            .matching_books
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(fanatical_titles, vec!["Dune", "Children of Dune"]);
        assert_eq!(hits[1].matching_books[0].formats, vec!["EPUB"]);
        assert_eq!(hits[1].source, SourceKind::Fanatical);
        assert_eq!(
            hits[1].purchase_date.map(|d| d.to_rfc3339()),
            Some("2023-07-04T12:00:00+00:00".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_humble_bundle() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), Some(&fanatical_catalog())).await;
        let library = Library::new(catalogs.config.clone());

        let detail = library.bundle("art_of_programming").await.unwrap().unwrap();
        assert_eq!(detail.source, SourceKind::Humble);
        assert_eq!(detail.amount_spent.as_deref(), Some("25"));
        assert_eq!(detail.num_books, 3);
        assert!(detail.purchase_date.is_some());

        let mobi = detail.books[0].formats.get("MOBI").unwrap();
        assert_eq!(mobi.size, 0.0);
        assert!(mobi.download_urls.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_fanatical_bundle() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), Some(&fanatical_catalog())).await;
        let library = Library::new(catalogs.config.clone());

        let detail = library.bundle("dune-collection").await.unwrap().unwrap();
        assert_eq!(detail.source, SourceKind::Fanatical);
        assert_eq!(detail.id, "dune-collection");
        assert_eq!(detail.gamekey.as_deref(), Some("60aa01"));
        assert_eq!(detail.amount_spent.as_deref(), Some("5.00"));
        assert_eq!(detail.cover.as_deref(), Some("https://img.example/dune.jpg"));
        assert_eq!(
            detail.purchase_date.map(|d| d.to_rfc3339()),
            Some("2023-07-04T12:00:00+00:00".to_string())
        );

        let epub = detail.books[0].formats.get("EPUB").unwrap();
        assert_eq!(epub.size, 2.5);
        assert_eq!(detail.books[0].formats.len(), 1);

        let slugless = library.bundle("60aa02").await.unwrap().unwrap();
        assert_eq!(slugless.name, "Bargain Bin");
        assert_eq!(slugless.amount_spent.as_deref(), Some("5.00"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_id() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), Some(&fanatical_catalog())).await;
        let library = Library::new(catalogs.config.clone());

        assert!(library.bundle("does-not-exist").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_without_fanatical_file() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), None).await;
        let library = Library::new(catalogs.config.clone());

        assert!(library.bundle("dune-collection").await.unwrap().is_none());
        assert!(library.bundle("scifi_classics").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_queries_reread_files() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), None).await;
        let library = Library::new(catalogs.config.clone());

        let before = library.listing(&ListingQuery::default()).await.unwrap();
        assert_eq!(before.bundles.len(), 3);

        common::write_raw_fanatical(&catalogs, &fanatical_catalog().to_string()).await;
        let after = library.listing(&ListingQuery::default()).await.unwrap();
        assert_eq!(after.bundles.len(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_queries() {
        let catalogs = setup_catalogs(Some(&humble_catalog()), Some(&fanatical_catalog())).await;
        let library = Library::new(catalogs.config.clone());

        let by_name = ListingQuery::default();
        let by_date = params(&[("sort", "date")]);
        let (a, b, c) = tokio::join!(
            library.listing(&by_name),
            library.listing(&by_date),
            library.bundle("scifi_classics"),
        );

        assert_eq!(a.unwrap().bundles.len(), 5);
        assert_eq!(b.unwrap().bundles.len(), 5);
        assert!(c.unwrap().is_some());
    }
}
