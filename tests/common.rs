//! Common test utilities and fixtures
//!
//! Shared catalog documents and on-disk setup used across test modules.

use kura::config::{LibraryConfig, LibraryConfigBuilder};
use serde_json::{Value, json};
use tempfile::TempDir;

#[allow(dead_code)]
pub const HUMBLE_FILE: &str = "detailed_catalog.json";
#[allow(dead_code)]
pub const FANATICAL_FILE: &str = "fanatical-book-details.json";

/// Catalog files written into a temporary directory.
///
/// The directory is removed when the fixture is dropped.
#[allow(dead_code)]
pub struct CatalogDir {
    pub dir: TempDir,
    pub config: LibraryConfig,
}

/// Writes the given documents as catalog files. `None` leaves that file absent.
#[allow(dead_code)]
pub async fn setup_catalogs(humble: Option<&Value>, fanatical: Option<&Value>) -> CatalogDir {
    let dir = tempfile::tempdir().unwrap();
    let humble_path = dir.path().join(HUMBLE_FILE);
    let fanatical_path = dir.path().join(FANATICAL_FILE);

    if let Some(doc) = humble {
        tokio::fs::write(&humble_path, serde_json::to_vec_pretty(doc).unwrap())
            .await
            .unwrap();
    }
    if let Some(doc) = fanatical {
        tokio::fs::write(&fanatical_path, serde_json::to_vec_pretty(doc).unwrap())
            .await
            .unwrap();
    }

    let config = LibraryConfigBuilder::default()
        .humble_path(humble_path)
        .fanatical_path(fanatical_path)
        .build()
        .unwrap();

    CatalogDir { dir, config }
}

/// Writes raw text as the Humble catalog, for malformed-document tests.
#[allow(dead_code)]
pub async fn write_raw_humble(catalogs: &CatalogDir, text: &str) {
    tokio::fs::write(&catalogs.config.humble_path, text)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn write_raw_fanatical(catalogs: &CatalogDir, text: &str) {
    tokio::fs::write(&catalogs.config.fanatical_path, text)
        .await
        .unwrap();
}

/// A Humble catalog with three bundles. Totals are deliberately not equal to
/// the bundle count.
#[allow(dead_code)]
pub fn humble_catalog() -> Value {
    json!({
        "All Bundles": 20,
        "Book Bundles": 8,
        "bundles": [
            {
                "machine_name": "scifi_classics",
                "human_name": "Sci-Fi Classics",
                "purchase_date": "2019-05-14T19:08:50.475190",
                "Number of books": 10,
                "downloaded": true,
                "gamekey": "GK-SCIFI",
                "amount_spent": "15.00",
                "books": [
                    {
                        "Book Title": "Dune Messiah",
                        "Authors": "Frank Herbert",
                        "Publisher": "Ace",
                        "Available Formats": [
                            { "format": "EPUB", "size": "1.2 MB", "download_urls": { "web": "https://dl.example/dm.epub" } },
                            { "format": "PDF", "size": "4.8 MB", "download_urls": { "web": "https://dl.example/dm.pdf" } }
                        ]
                    },
                    { "Book Title": "Foundation", "Author": "Isaac Asimov" }
                ]
            },
            {
                "machine_name": "art_of_programming",
                "human_name": "art of Programming",
                "purchase date": "2021-02-01 10:00:00",
                "Number of books": 3,
                "downloaded": false,
                "amount spent": 25,
                "books": [
                    {
                        "Book Title": "Rust in Action",
                        "Available Formats": [{ "format": "MOBI", "size": "n/a" }]
                    }
                ]
            },
            {
                "machine_name": "empty_bundle",
                "human_name": "Empty Bundle",
                "downloaded": false
            }
        ]
    })
}

/// A Fanatical catalog with two bundles, one identified only by `_id`.
#[allow(dead_code)]
pub fn fanatical_catalog() -> Value {
    json!({
        "bundles": [
            {
                "_id": "60aa01",
                "slug": "dune-collection",
                "name": "Dune Collection",
                "cover": "https://img.example/dune.jpg",
                "downloaded": true,
                "purchase_date": "2023-07-04T12:00:00Z",
                "total_spent": "500",
                "books": [
                    {
                        "name": "Dune",
                        "cover": "https://img.example/dune-book.jpg",
                        "files": [
                            { "format": "EPUB", "size_MB": 2.0, "api_download": "https://api.example/1" },
                            { "format": "EPUB", "size_MB": 2.5, "api_download": "https://api.example/2" }
                        ]
                    },
                    { "name": "Children of Dune", "files": [] }
                ]
            },
            {
                "_id": "60aa02",
                "name": "Bargain Bin",
                "total_spent": "5.00",
                "books": []
            }
        ]
    })
}
