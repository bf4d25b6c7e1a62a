//! Error types for lunchline-notify

use thiserror::Error;

/// Result type alias for lunchline-notify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while delivering a message
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Transport-level failure; the request URL is stripped before wrapping
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{service} rejected the message ({status}): {body}")]
    Rejected {
        /// Service name (`telegram`, `mailgun`)
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Missing or invalid credentials or addresses
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Turns a non-2xx response into [`Error::Rejected`], logging status and body.
pub(crate) async fn check_response(service: &'static str, response: reqwest::Response) -> Result<()> {
    let status = response.status();
    let body = response.text().await.map_err(reqwest::Error::without_url)?;

    if status.is_success() {
        tracing::debug!(service, status = %status, body = %body, "Delivery accepted");
        return Ok(());
    }

    tracing::error!(service, status = %status, body = %body, "Delivery rejected");
    Err(Error::Rejected {
        service,
        status: status.as_u16(),
        body,
    })
}
