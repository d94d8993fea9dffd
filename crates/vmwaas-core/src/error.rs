//! Error types for VMware as a Service operations.
//!
//! Every failure a call can produce is a variant of [`Error`]. Pre-flight
//! failures (configuration, URL templating) are raised before any network
//! activity; failures that happen after a response arrived carry the
//! [`DetailedResponse`] so callers can still log the transaction id.

use reqwest::StatusCode;
use thiserror::Error;

use crate::response::DetailedResponse;

/// Main error type for VMware as a Service operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Missing required option, invalid client configuration, or an
    /// unsupported region.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A path template could not be resolved.
    #[error("Invalid URL: {0}")]
    UrlError(String),

    /// The authenticator could not produce credentials.
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Connection, TLS, or read/write failure before a complete response.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The request timed out before a response arrived.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The service answered with a non-2xx status.
    #[error("Service error {}: {}", .0.status.as_u16(), .0.message)]
    ServiceError(Box<ServiceError>),

    /// A 2xx response body did not match the expected schema.
    #[error("Failed to parse response at `{pointer}`: {message}")]
    ParseError {
        /// JSON pointer (RFC 6901) of the first failing field
        pointer: String,
        /// Decoder message
        message: String,
        /// Response the body came from, when one was received
        response: Option<Box<DetailedResponse>>,
    },

    /// A request body could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The caller cancelled the operation.
    #[error("Request cancelled")]
    Cancelled,
}

/// Specialized result type for VMware as a Service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Decoded non-2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError {
    /// HTTP status
    pub status: StatusCode,
    /// Machine-readable error code from the envelope
    pub code: Option<String>,
    /// Human-readable message (falls back to the status reason phrase)
    pub message: String,
    /// Link to further documentation
    pub more_info: Option<String>,
    /// Server transaction id, when the response carried one
    pub transaction_id: Option<String>,
    /// The full response
    pub response: DetailedResponse,
}

impl ServiceError {
    /// Whether the status is worth another attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        is_retryable_status(self.status)
    }
}

/// 429 and every 5xx except 501 Not Implemented.
#[must_use]
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::UrlError(_) => "URL_ERROR",
            Self::AuthError(_) => "AUTH_ERROR",
            Self::TransportError(_) => "TRANSPORT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceError(_) => "SERVICE_ERROR",
            Self::ParseError { .. } => "PARSE_ERROR",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns true if the dispatcher may retry after this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransportError(_) | Self::Timeout(_) => true,
            Self::ServiceError(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Returns true for errors raised before any network activity.
    #[must_use]
    pub const fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::UrlError(_) | Self::SerializationError(_)
        )
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::AuthError(_) | Self::ConfigError(_) | Self::ParseError { .. }
        )
    }

    /// HTTP status of the response behind this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        self.detailed_response().map(|response| response.status_code)
    }

    /// The response behind this error, if one was received.
    #[must_use]
    pub fn detailed_response(&self) -> Option<&DetailedResponse> {
        match self {
            Self::ServiceError(err) => Some(&err.response),
            Self::ParseError { response, .. } => response.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_builder() {
            Self::ConfigError(err.to_string())
        } else {
            Self::TransportError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::UrlError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(format!("invalid options: {err}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
