//! Outbound request assembly.
//!
//! [`RequestBuilder`] collects the method, resolved URL, headers, query
//! parameters and body of a call without doing any I/O. [`RequestBuilder::build`]
//! is pure: the same inputs always produce the same URL, header order and body
//! bytes.

use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::codec;
use crate::error::{Error, Result};
use crate::patch::{JsonPatchOperation, JSON_PATCH_CONTENT_TYPE};

/// Content type of a JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Characters escaped in a path segment (RFC 3986 `pchar` complement).
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Whether `value` would be read as a `.` or `..` path segment, including
/// the `%2e` spellings URL parsers normalize the same way.
fn is_dot_segment(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    matches!(
        lowered.as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

/// Percent-encode a single path segment.
#[must_use]
pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Substitute `{name}` placeholders in `template` and prepend `base`.
///
/// Values are percent-encoded as path segments. Parameters not named in the
/// template are ignored.
///
/// # Errors
///
/// Returns [`Error::UrlError`] when a placeholder has no value, a value is
/// empty or a dot segment, the template is malformed, or the result is not
/// a valid URL.
pub fn resolve_url(base: &str, template: &str, params: &[(&str, &str)]) -> Result<Url> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        path.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            Error::UrlError(format!("unterminated placeholder in path template `{template}`"))
        })?;
        let name = &after[..close];

        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                Error::UrlError(format!(
                    "no value for path parameter `{name}` in `{template}`"
                ))
            })?;

        let encoded = encode_path_segment(value);
        if encoded.is_empty() {
            return Err(Error::UrlError(format!(
                "path parameter `{name}` must not be empty"
            )));
        }
        if is_dot_segment(value) {
            return Err(Error::UrlError(format!(
                "path parameter `{name}` must not be `{value}`"
            )));
        }

        path.push_str(&encoded);
        rest = &after[close + 1..];
    }
    path.push_str(rest);

    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return Err(Error::UrlError("service URL is not set".to_string()));
    }

    Url::parse(&format!("{base}{path}"))
        .map_err(|err| Error::UrlError(format!("invalid request URL for `{template}`: {err}")))
}

/// Accumulates the parts of an outbound request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Option<Url>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    gzip: bool,
    token: Option<CancellationToken>,
}

impl RequestBuilder {
    /// Start a request with the given method.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            url: None,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            gzip: false,
            token: None,
        }
    }

    /// Replace the method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Attach a cancellation token.
    #[must_use]
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Use an already resolved URL.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Resolve `template` against `base` with `params`; see [`resolve_url`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlError`] if the template cannot be resolved.
    pub fn resolve_url(mut self, base: &str, template: &str, params: &[(&str, &str)]) -> Result<Self> {
        self.url = Some(resolve_url(base, template, params)?);
        Ok(self)
    }

    /// Append a header value, keeping any existing ones.
    #[must_use]
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set a header, dropping existing values with the same name.
    #[must_use]
    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn add_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Whether a header is present (case-insensitive).
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }

    /// First value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set the body to the canonical JSON encoding of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if `value` cannot be encoded.
    pub fn set_body_json<T>(self, value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let bytes = codec::to_canonical_json(value)?;
        Ok(self.with_body(bytes, JSON_CONTENT_TYPE))
    }

    /// Set the body to a JSON Patch document, keeping operation order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if an operand cannot be encoded.
    pub fn set_body_json_patch(self, operations: &[JsonPatchOperation]) -> Result<Self> {
        let bytes = codec::to_canonical_json(operations)?;
        Ok(self.with_body(bytes, JSON_PATCH_CONTENT_TYPE))
    }

    fn with_body(mut self, bytes: Vec<u8>, content_type: &str) -> Self {
        if !self.has_header("Content-Type") {
            self.headers
                .push(("Content-Type".to_string(), content_type.to_string()));
        }
        self.body = Some(bytes);
        self
    }

    /// Compress the body with gzip when it is built.
    #[must_use]
    pub fn enable_gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    /// Produce the immutable request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlError`] if no URL was resolved, or an encoding
    /// error if gzip compression fails.
    pub fn build(self) -> Result<Request> {
        let mut url = self
            .url
            .ok_or_else(|| Error::UrlError("request URL was not resolved".to_string()))?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }

        let mut headers = self.headers;
        let body = match self.body {
            Some(bytes) if self.gzip && !bytes.is_empty() => {
                debug!(len = bytes.len(), "compressing request body");
                headers.retain(|(name, _)| !name.eq_ignore_ascii_case("Content-Encoding"));
                headers.push(("Content-Encoding".to_string(), "gzip".to_string()));
                Bytes::from(codec::gzip(&bytes)?)
            }
            Some(bytes) => Bytes::from(bytes),
            None => Bytes::new(),
        };

        Ok(Request {
            method: self.method,
            url,
            headers,
            body,
            token: self.token.unwrap_or_else(CancellationToken::new),
        })
    }
}

/// An immutable, fully assembled request.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    body: Bytes,
    token: CancellationToken,
}

impl Request {
    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Fully resolved URL, including the query string.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body bytes, already compressed when gzip was enabled.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Cancellation token observed by the dispatcher.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The request line, e.g. `GET https://host/v1/vdcs`.
    #[must_use]
    pub fn request_line(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}
