//! Error types for the catalog browser.
//!
//! [`YamiyumeError`] covers every failure the crate can produce, from HTTP
//! transport problems while talking to the media source to configuration and
//! theme loading. [`Result`] is the matching alias used throughout the crate.

use thiserror::Error;

/// The main error type for catalog operations.
///
/// Fetch failures never reach the renderer as errors: the event handler turns
/// them into a user-facing status message. The variants still carry enough
/// detail for tracing and for deciding whether a retry is worthwhile.
#[derive(Debug, Error)]
pub enum YamiyumeError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The media source answered with a non-success status code.
    #[error("API error {status_code}: {message}")]
    Api {
        status_code: u16,
        message: String,
    },

    /// The GraphQL endpoint answered 200 but reported query errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response body did not match the expected shape.
    ///
    /// `path` points at the offending JSON location, e.g. `data.Page.media[3].id`.
    #[error("Failed to decode response at {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A newer request started while this one was waiting to retry.
    #[error("request superseded by a newer one")]
    Superseded,
}

impl YamiyumeError {
    /// Whether another attempt at the same request could plausibly succeed.
    ///
    /// Transport and decode failures, server errors and rate limiting are
    /// transient. Client errors, GraphQL validation errors and local failures
    /// are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Json { .. } => true,
            Self::Api { status_code, .. } => *status_code >= 500 || *status_code == 429,
            Self::GraphQl(_) | Self::Io(_) | Self::Config(_) | Self::Theme(_) | Self::Superseded => false,
        }
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, YamiyumeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_and_rate_limits_are_transient() {
        let server = YamiyumeError::Api { status_code: 502, message: String::new() };
        let limited = YamiyumeError::Api { status_code: 429, message: String::new() };
        let not_found = YamiyumeError::Api { status_code: 404, message: String::new() };

        assert!(server.is_transient());
        assert!(limited.is_transient());
        assert!(!not_found.is_transient());
    }

    #[test]
    fn graphql_and_superseded_are_not_retried() {
        assert!(!YamiyumeError::GraphQl("Syntax Error".into()).is_transient());
        assert!(!YamiyumeError::Superseded.is_transient());
    }

    #[test]
    fn decode_errors_are_transient() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = YamiyumeError::Json { path: "data.Page".into(), source };
        assert!(err.is_transient());
        assert!(err.to_string().contains("data.Page"));
    }
}
