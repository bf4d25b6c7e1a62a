//! Error types for the Lunchline core library.

/// Errors that can occur while transforming or rendering a menu.
///
/// Marked `#[non_exhaustive]` so new variants can be added without
/// breaking downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Menu payload did not have the expected top-level shape
    #[error("Parse error: {message}")]
    Parse {
        /// What was wrong with the payload
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A date string could not be parsed as `YYYY-MM-DD`
    #[error("Invalid date: {input}")]
    InvalidDate {
        /// The rejected input
        input: String,
    },
}

/// Convenience `Result` type alias for Lunchline operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new invalid-date error.
    pub fn invalid_date<S: Into<String>>(input: S) -> Self {
        Error::InvalidDate {
            input: input.into(),
        }
    }
}
