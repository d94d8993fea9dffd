//! HTTP client configuration, retry logic, and the service dispatcher.
//!
//! [`ServiceClient`] owns the shared `reqwest` connection pool and the
//! authenticator. Every generated operation composes a [`RequestBuilder`]
//! through [`ServiceClient::new_request`] and hands it to
//! [`ServiceClient::execute`], which attaches credentials, sends the request,
//! retries transient failures and decodes the response.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::Authenticator;
use crate::codec;
use crate::config::ServiceConfig;
use crate::error::{Error, Result, ServiceError};
use crate::request::{Request, RequestBuilder};
use crate::response::{DetailedResponse, ServiceResponse};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

// Retry settings

/// Default maximum number of retries once retries are enabled
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Default cap on a single retry delay, in seconds
pub const DEFAULT_MAX_RETRY_INTERVAL_SECS: u64 = 30;

/// Default initial retry delay in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Header a throttling service uses to ask for a specific delay.
pub const RETRY_AFTER_HEADER: &str = "Retry-After";

/// Retry policy with exponential backoff.
///
/// The dispatcher retries transport failures, 429, and 5xx responses other
/// than 501. Each delay is capped at `max_delay`, including delays requested
/// by the service through `Retry-After`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries (attempts are at most `max_retries + 1`)
    pub max_retries: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Cap on any single delay
    pub max_delay: Duration,

    /// Backoff multiplier
    pub backoff_multiplier: u32,
}

impl RetryPolicy {
    /// Create an enabled retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_delay: Duration::from_secs(DEFAULT_MAX_RETRY_INTERVAL_SECS),
            backoff_multiplier: 2,
        }
    }

    /// Create a retry policy with no retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1,
        }
    }

    /// Enabled policy where zero arguments select the defaults.
    #[must_use]
    pub const fn enabled(max_retries: u32, max_retry_interval: Duration) -> Self {
        let policy = Self::new();
        let policy = if max_retries == 0 {
            policy
        } else {
            policy.with_max_retries(max_retries)
        };
        if max_retry_interval.is_zero() {
            policy
        } else {
            policy.with_max_delay(max_retry_interval)
        }
    }

    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub const fn with_backoff_multiplier(mut self, multiplier: u32) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculate the un-jittered delay for a given retry number.
    ///
    /// Uses exponential backoff: delay = min(initial_delay * multiplier^(attempt-1), max_delay)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let multiplier = self.backoff_multiplier.saturating_pow(attempt - 1);
        let initial_ms = u64::try_from(self.initial_delay.as_millis()).unwrap_or(u64::MAX);
        let delay = Duration::from_millis(initial_ms.saturating_mul(u64::from(multiplier)));

        std::cmp::min(delay, self.max_delay)
    }

    /// Delay with equal jitter: half the backoff plus a random share of the other half.
    #[must_use]
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        let delay = self.delay_for_attempt(attempt);
        let half = delay / 2;
        let spread = u64::try_from((delay - half).as_millis()).unwrap_or(u64::MAX);
        if spread == 0 {
            return delay;
        }
        half + Duration::from_millis(rand::thread_rng().gen_range(0..=spread))
    }

    /// Delay before retry number `attempt`.
    ///
    /// A server-requested delay replaces the computed backoff; both are
    /// capped at `max_delay`.
    #[must_use]
    pub fn retry_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(requested) => std::cmp::min(requested, self.max_delay),
            None => self.jittered_delay(attempt),
        }
    }

    /// Check if retries are enabled.
    #[must_use]
    pub const fn has_retries(&self) -> bool {
        self.max_retries > 0
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `Retry-After` value: delta-seconds or an HTTP-date.
///
/// Dates in the past give a zero delay.
#[must_use]
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

/// HTTP client configuration.
///
/// Configures timeouts, retries, connection pooling, body compression and
/// TLS verification for a [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Retry policy
    pub retry_policy: RetryPolicy,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Gzip-compress request bodies
    pub enable_gzip: bool,

    /// Verify TLS certificates
    pub tls_verify: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    ///
    /// Retries are disabled until explicitly enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_policy: RetryPolicy::no_retry(),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_gzip: false,
            tls_verify: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Disable retries.
    #[must_use]
    pub const fn without_retries(mut self) -> Self {
        self.retry_policy = RetryPolicy::no_retry();
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable request body compression.
    #[must_use]
    pub const fn with_gzip(mut self, enabled: bool) -> Self {
        self.enable_gzip = enabled;
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ServiceClient`].
pub struct ServiceClientBuilder {
    service_url: String,
    authenticator: Option<Arc<dyn Authenticator>>,
    config: ClientConfig,
    default_headers: BTreeMap<String, String>,
    tls_ca_cert: Option<PathBuf>,
    http_client: Option<reqwest::Client>,
}

impl ServiceClientBuilder {
    /// Start a builder for the given service URL.
    #[must_use]
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            authenticator: None,
            config: ClientConfig::new(),
            default_headers: BTreeMap::new(),
            tls_ca_cert: None,
            http_client: None,
        }
    }

    /// Start a builder from a loaded [`ServiceConfig`].
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        let client_config = ClientConfig::new()
            .with_timeout(config.timeout())
            .with_retry_policy(config.retry_policy())
            .with_gzip(config.enable_gzip)
            .with_tls_verify(config.tls_verify);

        Self {
            service_url: config.service_url.clone(),
            authenticator: None,
            config: client_config,
            default_headers: config.default_headers.clone(),
            tls_ca_cert: config.tls_ca_cert.clone(),
            http_client: None,
        }
    }

    /// Set the authenticator (required).
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Replace the service URL.
    #[must_use]
    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = service_url.into();
        self
    }

    /// Replace the HTTP client configuration.
    #[must_use]
    pub fn with_client_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry_policy = policy;
        self
    }

    /// Enable or disable request body compression.
    #[must_use]
    pub fn with_gzip(mut self, enabled: bool) -> Self {
        self.config.enable_gzip = enabled;
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.config.tls_verify = verify;
        self
    }

    /// Trust an extra CA certificate (PEM file).
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Add a header sent with every request unless the call sets it.
    #[must_use]
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Use a pre-built `reqwest` client instead of building one.
    ///
    /// Timeout, pool and TLS settings are then the caller's responsibility.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if no authenticator was set, the
    /// authenticator is invalid, the service URL is not a valid URL, or the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<ServiceClient> {
        let authenticator = self
            .authenticator
            .ok_or_else(|| Error::ConfigError("an authenticator is required".to_string()))?;
        authenticator.validate()?;

        let service_url = normalize_service_url(&self.service_url)?;

        let http = match self.http_client {
            Some(client) => client,
            None => build_http_client(&self.config, self.tls_ca_cert.as_deref())?,
        };

        debug!(
            service_url = %service_url,
            authentication_type = authenticator.authentication_type(),
            "built service client"
        );

        Ok(ServiceClient {
            http,
            authenticator,
            service_url,
            default_headers: self.default_headers,
            retry_policy: self.config.retry_policy,
            enable_gzip: self.config.enable_gzip,
        })
    }
}

impl fmt::Debug for ServiceClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClientBuilder")
            .field("service_url", &self.service_url)
            .field("has_authenticator", &self.authenticator.is_some())
            .field("config", &self.config)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

fn normalize_service_url(service_url: &str) -> Result<String> {
    let trimmed = service_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::ConfigError("service URL must not be empty".to_string()));
    }
    url::Url::parse(trimmed)
        .map_err(|e| Error::ConfigError(format!("Invalid service URL `{trimmed}`: {e}")))?;
    Ok(trimmed.to_string())
}

fn build_http_client(config: &ClientConfig, ca_cert: Option<&std::path::Path>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(config.timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host);

    if !config.tls_verify {
        warn!("TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(path) = ca_cert {
        let pem = std::fs::read(path).map_err(|e| {
            Error::ConfigError(format!("cannot read CA certificate {}: {e}", path.display()))
        })?;
        let certificate = reqwest::Certificate::from_pem(&pem)
            .map_err(|e| Error::ConfigError(format!("invalid CA certificate: {e}")))?;
        builder = builder.add_root_certificate(certificate);
    }

    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {e}")))
}

/// Request dispatcher shared by every operation of a service.
///
/// Cloning is cheap: clones share the authenticator and the connection
/// pool, while URL, default headers, retry policy and gzip setting are owned
/// per clone.
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    authenticator: Arc<dyn Authenticator>,
    service_url: String,
    default_headers: BTreeMap<String, String>,
    retry_policy: RetryPolicy,
    enable_gzip: bool,
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service_url", &self.service_url)
            .field("authentication_type", &self.authenticator.authentication_type())
            .field("default_headers", &self.default_headers)
            .field("retry_policy", &self.retry_policy)
            .field("enable_gzip", &self.enable_gzip)
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Start building a client for `service_url`.
    #[must_use]
    pub fn builder(service_url: impl Into<String>) -> ServiceClientBuilder {
        ServiceClientBuilder::new(service_url)
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Point this client at another base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL is empty or invalid.
    pub fn set_service_url(&mut self, service_url: &str) -> Result<()> {
        self.service_url = normalize_service_url(service_url)?;
        Ok(())
    }

    /// Headers added to every request that does not set them itself.
    #[must_use]
    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Replace the default headers.
    pub fn set_default_headers(&mut self, headers: BTreeMap<String, String>) {
        self.default_headers = headers;
    }

    /// Enable retries; zero arguments select the defaults.
    pub fn enable_retries(&mut self, max_retries: u32, max_retry_interval: Duration) {
        self.retry_policy = RetryPolicy::enabled(max_retries, max_retry_interval);
    }

    /// Disable retries.
    pub fn disable_retries(&mut self) {
        self.retry_policy = RetryPolicy::no_retry();
    }

    /// Replace the retry policy wholesale.
    pub fn set_retry_policy(&mut self, policy: RetryPolicy) {
        self.retry_policy = policy;
    }

    /// Current retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Enable or disable gzip compression of request bodies.
    pub fn set_enable_gzip_compression(&mut self, enabled: bool) {
        self.enable_gzip = enabled;
    }

    /// Whether request bodies are compressed.
    #[must_use]
    pub const fn is_gzip_enabled(&self) -> bool {
        self.enable_gzip
    }

    /// The authenticator attached to every request.
    #[must_use]
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Start a request whose URL is `template` resolved against the service URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlError`] if a path parameter is missing or empty.
    pub fn new_request(
        &self,
        method: Method,
        template: &str,
        params: &[(&str, &str)],
    ) -> Result<RequestBuilder> {
        RequestBuilder::new(method).resolve_url(&self.service_url, template, params)
    }

    /// Send a request and decode a 2xx body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the request's token fires, the
    /// authenticator's error, a transport error or timeout once retries are
    /// exhausted, [`Error::ServiceError`] for a non-2xx response, or
    /// [`Error::ParseError`] when a 2xx body does not match `T`.
    pub async fn execute<T>(&self, builder: RequestBuilder) -> Result<ServiceResponse<T>>
    where
        T: DeserializeOwned,
    {
        let mut builder = builder;
        for (name, value) in &self.default_headers {
            if !builder.has_header(name) {
                builder = builder.add_header(name.clone(), value.clone());
            }
        }
        if self.enable_gzip {
            builder = builder.enable_gzip(true);
        }
        let request = builder.build()?;

        if request.token().is_cancelled() {
            debug!(request = %request.request_line(), "request cancelled before dispatch");
            return Err(Error::Cancelled);
        }

        let policy = self.retry_policy;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            info!(
                method = %request.method(),
                url = %request.url(),
                attempt,
                "sending request"
            );

            match self.send_once::<T>(&request).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt <= policy.max_retries => {
                    let retry_after = err
                        .detailed_response()
                        .and_then(|response| response.header(RETRY_AFTER_HEADER))
                        .and_then(|value| parse_retry_after(value, Utc::now()));
                    let delay = policy.retry_delay(attempt, retry_after);

                    warn!(
                        attempt,
                        max_retries = policy.max_retries,
                        error = %err,
                        "request failed, retrying"
                    );
                    debug!(
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "sleeping before retry"
                    );

                    tokio::select! {
                        () = request.token().cancelled() => return Err(Error::Cancelled),
                        () = tokio::time::sleep(delay) => {}
                    }
                }
                Err(err) => {
                    if err.should_log() {
                        warn!(error_code = err.error_code(), error = %err, "request failed");
                    } else {
                        debug!(error_code = err.error_code(), error = %err, "request failed");
                    }
                    return Err(err);
                }
            }
        }
    }

    async fn send_once<T>(&self, request: &Request) -> Result<ServiceResponse<T>>
    where
        T: DeserializeOwned,
    {
        let token = request.token();
        let mut http_request = self.to_http_request(request)?;

        tokio::select! {
            () = token.cancelled() => return Err(Error::Cancelled),
            result = self.authenticator.authenticate(&mut http_request) => result?,
        }

        let response = tokio::select! {
            () = token.cancelled() => return Err(Error::Cancelled),
            result = self.http.execute(http_request) => result?,
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = tokio::select! {
            () = token.cancelled() => return Err(Error::Cancelled),
            result = response.bytes() => result?,
        };

        let detailed = DetailedResponse::new(status, headers, body);
        debug!(
            status = status.as_u16(),
            transaction_id = ?detailed.transaction_id,
            bytes = detailed.raw_body.len(),
            "received response"
        );

        if !status.is_success() {
            return Err(Error::ServiceError(Box::new(decode_service_error(detailed))));
        }

        if detailed.is_empty_body() {
            return Ok(ServiceResponse {
                result: None,
                response: detailed,
            });
        }

        match codec::unmarshal::<T>(&detailed.raw_body) {
            Ok(result) => Ok(ServiceResponse {
                result: Some(result),
                response: detailed,
            }),
            Err(Error::ParseError { pointer, message, .. }) => Err(Error::ParseError {
                pointer,
                message,
                response: Some(Box::new(detailed)),
            }),
            Err(other) => Err(other),
        }
    }

    fn to_http_request(&self, request: &Request) -> Result<reqwest::Request> {
        let mut builder = self
            .http
            .request(request.method().clone(), request.url().clone());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.body().is_empty() {
            builder = builder.body(request.body().clone());
        }
        builder.build().map_err(Error::from)
    }
}

fn string_field(value: Option<&Value>, key: &str) -> Option<String> {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Decode a non-2xx body into a [`ServiceError`].
///
/// Understands `{code, message, more_info}`, the `{"errors": [...], "trace"}`
/// list form, and bare `{"error"}` / `{"message"}` objects. Anything else
/// falls back to the status reason phrase.
fn decode_service_error(response: DetailedResponse) -> ServiceError {
    let envelope: Option<Value> = serde_json::from_slice(&response.raw_body).ok();
    let envelope = envelope.as_ref();
    let first = envelope
        .and_then(|v| v.get("errors"))
        .and_then(|errors| errors.get(0))
        .or(envelope);

    let message = string_field(first, "message")
        .or_else(|| string_field(first, "error"))
        .or_else(|| string_field(envelope, "message"))
        .or_else(|| string_field(envelope, "error"))
        .unwrap_or_else(|| {
            response
                .status_code
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    let transaction_id = response
        .transaction_id
        .clone()
        .or_else(|| string_field(envelope, "trace"));

    ServiceError {
        status: response.status_code,
        code: string_field(first, "code"),
        message,
        more_info: string_field(first, "more_info"),
        transaction_id,
        response,
    }
}
