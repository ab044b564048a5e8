//! Internal error types for InfluxDB operations.
//!
//! These errors are internal to `cablesync-influx` and are mapped to core
//! port errors at the boundary.

use cablesync_core::PointWriteError;
use thiserror::Error;

/// Result type alias for InfluxDB operations.
pub type InfluxResult<T> = Result<T, InfluxError>;

/// Errors related to InfluxDB API operations.
#[derive(Debug, Error)]
pub enum InfluxError {
    /// API request failed with an HTTP error status.
    #[error("InfluxDB request failed with status {status}: {message}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from InfluxDB: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The client configuration cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A point could not be written as line protocol.
    #[error("Cannot encode point: {0}")]
    Encoding(String),
}

impl From<reqwest::Error> for InfluxError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl InfluxError {
    /// Whether a retry might succeed: server-side failures and network errors.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::ApiRequestFailed { status, .. } => *status >= 500,
            Self::Network(_) => true,
            Self::InvalidResponse { .. }
            | Self::InvalidUrl(_)
            | Self::InvalidConfig(_)
            | Self::Encoding(_) => false,
        }
    }
}

impl From<InfluxError> for PointWriteError {
    fn from(e: InfluxError) -> Self {
        match e {
            InfluxError::ApiRequestFailed { status, message } => Self::Rejected { status, message },
            InfluxError::Encoding(msg) => Self::Encoding(msg),
            InfluxError::Network(msg) => Self::Connection(msg),
            other @ (InfluxError::InvalidResponse { .. }
            | InfluxError::InvalidUrl(_)
            | InfluxError::InvalidConfig(_)) => {
                Self::Connection(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_failed_error_message() {
        let error = InfluxError::ApiRequestFailed {
            status: 401,
            message: "unauthorized access".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("unauthorized access"));
    }

    #[test]
    fn test_transient_classification() {
        let server = InfluxError::ApiRequestFailed {
            status: 503,
            message: String::new(),
        };
        let client = InfluxError::ApiRequestFailed {
            status: 400,
            message: String::new(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert!(InfluxError::Network("reset".to_string()).is_transient());
        assert!(!InfluxError::Encoding("no fields".to_string()).is_transient());
    }

    #[test]
    fn test_maps_to_port_error() {
        let rejected: PointWriteError = InfluxError::ApiRequestFailed {
            status: 422,
            message: "partial write".to_string(),
        }
        .into();
        assert!(matches!(
            rejected,
            PointWriteError::Rejected { status: 422, .. }
        ));

        let connection: PointWriteError = InfluxError::Network("refused".to_string()).into();
        assert!(matches!(connection, PointWriteError::Connection(_)));

        let encoding: PointWriteError = InfluxError::Encoding("no fields".to_string()).into();
        assert!(matches!(encoding, PointWriteError::Encoding(_)));
    }
}
