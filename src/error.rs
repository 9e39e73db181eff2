use std::error::Error as StdError;

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    /// The transcription vendor answered with a non-success HTTP status.
    #[error("vendor request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    /// The vendor reported the transcript job itself as failed.
    #[error("transcription failed: {0}")]
    Vendor(String),

    /// Polling gave up before the transcript reached a terminal status.
    #[error("transcript did not complete after {attempts} polls")]
    PollLimit { attempts: u32 },

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_mentions_status_and_body() {
        let err = Error::Http {
            status: 401,
            body: "Invalid API key".to_owned(),
        };
        let s = err.to_string();
        assert!(s.contains("401"));
        assert!(s.contains("Invalid API key"));
    }

    #[test]
    fn io_errors_are_wrapped_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing media");
        let err: Error = io.into();
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(err.to_string(), "missing media");
    }
}
