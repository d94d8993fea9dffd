//! Response metadata returned with every call.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

/// Header the service uses to report its transaction id.
pub const TRANSACTION_ID_HEADER: &str = "X-Global-Transaction-ID";

/// Fallback header some gateways use instead of [`TRANSACTION_ID_HEADER`].
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Status, headers, transaction id, and raw body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedResponse {
    /// HTTP status
    pub status_code: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Server transaction id
    pub transaction_id: Option<String>,
    /// Undecoded body bytes
    pub raw_body: Bytes,
}

impl DetailedResponse {
    /// Capture a response, extracting the transaction id from the headers.
    #[must_use]
    pub fn new(status_code: StatusCode, headers: HeaderMap, raw_body: impl Into<Bytes>) -> Self {
        let transaction_id = [TRANSACTION_ID_HEADER, REQUEST_ID_HEADER]
            .iter()
            .find_map(|name| headers.get(*name))
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Self {
            status_code,
            headers,
            transaction_id,
            raw_body: raw_body.into(),
        }
    }

    /// True when the body holds nothing but whitespace.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        self.raw_body.iter().all(u8::is_ascii_whitespace)
    }

    /// First value of a header, if it is valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Typed result of a successful call plus the response it came from.
///
/// `result` is `None` when the service answered 2xx with an empty body.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse<T> {
    /// Decoded body
    pub result: Option<T>,
    /// Response metadata
    pub response: DetailedResponse,
}

impl<T> ServiceResponse<T> {
    /// HTTP status of the response.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.response.status_code
    }

    /// Server transaction id.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.response.transaction_id.as_deref()
    }

    /// Drop the metadata and keep the decoded body.
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}
