//! Catalog location configuration.

use derive_builder::Builder;
use std::path::PathBuf;

pub const DEFAULT_HUMBLE_CATALOG_PATH: &str =
    "../humble/humblebundle-ebook-downloader/detailed_catalog.json";
pub const DEFAULT_FANATICAL_CATALOG_PATH: &str = "fanatical-book-details.json";

pub const ENV_HUMBLE_CATALOG_PATH: &str = "HUMBLE_CATALOG_PATH";
pub const ENV_FANATICAL_CATALOG_PATH: &str = "FANATICAL_CATALOG_PATH";

/// Where the two catalog documents live.
///
/// ```rust
/// use kura::config::LibraryConfigBuilder;
///
/// let config = LibraryConfigBuilder::default()
///     .humble_path("data/humble.json")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.humble_path.to_str(), Some("data/humble.json"));
/// assert_eq!(config.fanatical_path.to_str(), Some("fanatical-book-details.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct LibraryConfig {
    #[builder(default = "PathBuf::from(DEFAULT_HUMBLE_CATALOG_PATH)")]
    pub humble_path: PathBuf,
    #[builder(default = "PathBuf::from(DEFAULT_FANATICAL_CATALOG_PATH)")]
    pub fanatical_path: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            humble_path: PathBuf::from(DEFAULT_HUMBLE_CATALOG_PATH),
            fanatical_path: PathBuf::from(DEFAULT_FANATICAL_CATALOG_PATH),
        }
    }
}

impl LibraryConfig {
    /// Reads `HUMBLE_CATALOG_PATH` and `FANATICAL_CATALOG_PATH`, using the
    /// defaults for unset or empty variables.
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            humble_path: var(ENV_HUMBLE_CATALOG_PATH, DEFAULT_HUMBLE_CATALOG_PATH),
            fanatical_path: var(ENV_FANATICAL_CATALOG_PATH, DEFAULT_FANATICAL_CATALOG_PATH),
        }
    }
}
