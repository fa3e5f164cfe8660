//! Catalog source implementations.
//!
//! # Available Sources
//!
//! - [`HumbleSource`] - Humble-style catalogs (`machine_name`, `"Available Formats"`, ...)
//! - [`FanaticalSource`] - Fanatical-style catalogs (`slug`, `files`, cents amounts)
//!
//! Use [`normalizer_for`](crate::source::normalizer_for) to pick one by
//! [`SourceKind`](crate::types::SourceKind).

pub mod fanatical;
pub mod humble;

pub use fanatical::FanaticalSource;
pub use humble::HumbleSource;
