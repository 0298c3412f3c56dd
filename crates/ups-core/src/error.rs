//! Error taxonomy for admin operations

use thiserror::Error;

/// Errors surfaced by the admin client.
///
/// Nothing here is retried. The only failure recovered locally is a 404 on a
/// direct identifier lookup, which `find` turns into an empty result.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Request rejected with status {status}: {message}")]
    ClientError { status: u16, message: String },

    #[error("Server failed with status {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[cfg(feature = "network")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Classify a non-2xx response.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let message = if text.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            text.trim().to_string()
        };

        match status {
            404 => Self::NotFound { message },
            400..=499 => Self::ClientError { status, message },
            _ => Self::ServerError { status, message },
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::ClientError { status, .. } | Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 404 response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(Error::from_status(404, b"gone").is_not_found());
        assert!(matches!(
            Error::from_status(409, b"dup"),
            Error::ClientError { status: 409, .. }
        ));
        assert!(matches!(
            Error::from_status(503, b""),
            Error::ServerError { status: 503, .. }
        ));
        // Redirects are not followed into success either.
        assert!(matches!(
            Error::from_status(302, b""),
            Error::ServerError { status: 302, .. }
        ));
    }

    #[test]
    fn test_empty_body_gets_status_message() {
        let err = Error::from_status(500, b"  \n");
        assert_eq!(err.to_string(), "Server failed with status 500: HTTP 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_not_found_keeps_server_message() {
        let err = Error::from_status(404, b"Application with id x not found");
        assert_eq!(err.to_string(), "Not found: Application with id x not found");
    }
}
