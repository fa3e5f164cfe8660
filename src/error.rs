//! Error types and result handling for Kura operations.
//!
//! All fallible operations return a [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Load Errors**: a catalog document could not be read or parsed
//! - **Invalid Parameters**: a query parameter holds an unknown value
//!
//! Malformed values inside a document are never errors; normalization
//! substitutes defaults for them.
//!
//! A bundle that cannot be found is *not* an error: lookups return `Ok(None)`.
//!
//! # Examples
//!
//! ```rust
//! use kura::{Error, Result};
//!
//! fn open() -> Result<()> {
//!     Err(Error::load("humble", "file not found"))
//! }
//!
//! match open() {
//!     Err(Error::Load { src, .. }) => assert_eq!(src, "humble"),
//!     _ => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// Type alias for Results with Kura errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all Kura operations.
///
/// # Variants
///
/// * [`Load`](Error::Load) - A catalog document could not be loaded
/// * [`InvalidParameter`](Error::InvalidParameter) - Unknown query parameter value
#[derive(Error, Debug)]
pub enum Error {
    /// A catalog document could not be read or parsed.
    ///
    /// `src` names the catalog (`"humble"` or `"fanatical"`), `message`
    /// carries the underlying cause.
    #[error("Error loading catalog [{src}]: {message}")]
    Load { src: String, message: String },

    /// A query parameter carried a value outside its allowed set.
    #[error("Invalid value {value:?} for parameter {name}")]
    InvalidParameter { name: String, value: String },
}

impl Error {
    /// Creates a load error for the named catalog.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kura::Error;
    ///
    /// let error = Error::load("humble", "unexpected end of input");
    /// assert!(error.to_string().contains("humble"));
    /// ```
    pub fn load(src: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Load {
            src: src.into(),
            message: msg.into(),
        }
    }

    /// Creates an invalid parameter error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kura::Error;
    ///
    /// let error = Error::invalid_parameter("sortDir", "sideways");
    /// assert_eq!(
    ///     error.to_string(),
    ///     "Invalid value \"sideways\" for parameter sortDir"
    /// );
    /// ```
    pub fn invalid_parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns `true` when this error means a catalog document was unusable.
    pub fn is_load(&self) -> bool {
        matches!(self, Error::Load { .. })
    }
}
