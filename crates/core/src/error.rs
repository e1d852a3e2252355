//! Error types for the guillotine packing engine.

use thiserror::Error;

/// Result type alias for packing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during packing operations.
///
/// A placement that does not fit is not an error: packers report it through
/// the item's `placed` flag. These variants cover rejected inputs only.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item geometry provided.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid bin boundary provided.
    #[error("Invalid boundary: {0}")]
    InvalidBoundary(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Checks that an extent is finite and strictly positive.
pub fn check_extent(what: &str, name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidGeometry(format!(
            "{what} {name} must be positive and finite, got {value}"
        )));
    }
    Ok(())
}
