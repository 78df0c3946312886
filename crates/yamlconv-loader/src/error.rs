use std::time::Duration;

use hyper::StatusCode;

/// Failure to obtain the bytes behind a location.
///
/// Every variant names the location so the message stands on its own.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("invalid URL {location:?}: {reason}")]
    InvalidUrl { location: String, reason: String },

    #[error("could not connect to {location:?}: {source}")]
    Connect {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS handshake with {location:?} failed: {source}")]
    Tls {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {location:?} failed: {source}")]
    Request {
        location: String,
        #[source]
        source: hyper::Error,
    },

    #[error("timed out after {}s loading {location:?}", .after.as_secs_f64())]
    Timeout { location: String, after: Duration },

    #[error("could not access document at {location:?} [{status}]")]
    Status { location: String, status: StatusCode },

    #[error("could not read {location:?}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

impl RetrievalError {
    /// The location that failed to load.
    pub fn location(&self) -> &str {
        match self {
            RetrievalError::InvalidUrl { location, .. }
            | RetrievalError::Connect { location, .. }
            | RetrievalError::Tls { location, .. }
            | RetrievalError::Request { location, .. }
            | RetrievalError::Timeout { location, .. }
            | RetrievalError::Status { location, .. }
            | RetrievalError::Read { location, .. } => location,
        }
    }
}
