//! Error types for lunchline-sources

use thiserror::Error;

/// Result type alias for lunchline-sources operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching a menu or forecast
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Transport-level failure (DNS, TLS, connection reset, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{url} returned {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body was not valid JSON
    #[error("Invalid JSON from {url}: {source}")]
    Json {
        /// Requested URL
        url: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed but could not be turned into a menu
    #[error("Menu error: {0}")]
    Core(#[from] lunchline_core::Error),
}
