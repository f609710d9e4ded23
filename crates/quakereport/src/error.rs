//! Error types for quakereport.
//!
//! This module defines all error types used throughout the quakereport crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for quakereport operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// An explicitly given configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was given.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Query Errors ===
    /// The feed request could not be built.
    #[error("invalid feed query: {message}")]
    Query {
        /// Description of what is wrong with the query.
        message: String,
    },

    // === Fetch Errors ===
    /// The request never produced a response.
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL being fetched.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("feed request to {url} failed with HTTP {status}")]
    Http {
        /// The URL being fetched.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    // === Feed Errors ===
    /// The feed document is not a usable GeoJSON feature collection.
    #[error("malformed feed: {message}")]
    Feed {
        /// Description of what is wrong with the document.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read a feed file from disk.
    #[error("failed to read feed file {path}: {source}")]
    FeedFile {
        /// Path that couldn't be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for quakereport operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new feed error.
    #[must_use]
    pub fn feed(message: impl Into<String>) -> Self {
        Self::Feed {
            message: message.into(),
        }
    }

    /// Create a new query error.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a new configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from talking to the server.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Http { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_display() {
        let err = Error::feed("missing features array");
        assert_eq!(err.to_string(), "malformed feed: missing features array");
    }

    #[test]
    fn test_query_error_display() {
        let err = Error::query("start_time is after end_time");
        assert_eq!(
            err.to_string(),
            "invalid feed query: start_time is after end_time"
        );
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("timeout_secs must be greater than 0");
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_config_not_found_display() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/etc/quakes/tpyo.toml"),
        };
        assert_eq!(
            err.to_string(),
            "configuration file not found: /etc/quakes/tpyo.toml"
        );
    }

    #[test]
    fn test_http_error_display() {
        let err = Error::Http {
            url: "https://example.test/query".to_string(),
            status: 503,
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("https://example.test/query"));
    }

    #[test]
    fn test_is_fetch_error() {
        let err = Error::Http {
            url: String::new(),
            status: 404,
        };
        assert!(err.is_fetch_error());
        assert!(!Error::feed("x").is_fetch_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_feed_file_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::FeedFile {
            path: PathBuf::from("/root/quakes.geojson"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/root/quakes.geojson"));
        assert!(msg.contains("access denied"));
    }
}
