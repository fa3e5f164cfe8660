//! Single-bundle lookup for the detail view.

use crate::{
    catalog::{FanaticalCatalog, HumbleCatalog},
    source::normalizer_for,
    types::{BundleDetail, SourceKind},
};

/// Resolves a bundle id to its detail record.
///
/// Humble bundles are searched first by `machine_name`; only when none
/// matches is the Fanatical catalog searched by `slug` (or `_id` for
/// bundles without a slug). `fanatical` is `None` when that catalog could
/// not be loaded, which simply makes Fanatical ids unresolvable.
///
/// Returns `None` when neither catalog holds the id.
///
/// # Examples
///
/// ```rust
/// use kura::catalog::HumbleCatalog;
/// use kura::resolve::resolve_bundle;
/// use serde_json::json;
///
/// let humble = HumbleCatalog::from_value(json!({
///     "bundles": [{ "machine_name": "b1", "human_name": "Bundle One", "gamekey": "key" }]
/// }))
/// .unwrap();
///
/// let detail = resolve_bundle(&humble, None, "b1").unwrap();
/// assert_eq!(detail.gamekey.as_deref(), Some("key"));
/// assert!(resolve_bundle(&humble, None, "missing").is_none());
/// ```
pub fn resolve_bundle(
    humble: &HumbleCatalog,
    fanatical: Option<&FanaticalCatalog>,
    id: &str,
) -> Option<BundleDetail> {
    let source = normalizer_for(SourceKind::Humble);
    if let Some(raw) = source.find(&humble.bundles, id) {
        tracing::debug!(id, source = source.name(), "resolved bundle");
        return Some(source.detail(raw));
    }

    let source = normalizer_for(SourceKind::Fanatical);
    let found = fanatical.and_then(|catalog| source.find(&catalog.bundles, id));
    tracing::debug!(
        id,
        source = source.name(),
        found = found.is_some(),
        "looked up bundle"
    );
    found.map(|raw| source.detail(raw))
}
