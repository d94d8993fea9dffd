//! Configuration structures for VMware as a Service clients.
//!
//! [`ServiceConfig`] is the serializable record a caller loads from wherever
//! it keeps settings (the SDK itself never reads the environment). It holds
//! the service URL plus the knobs the dispatcher exposes as setters.

use crate::client::{RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRY_INTERVAL_SECS};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Public endpoint of the VMware as a Service API.
pub const DEFAULT_SERVICE_URL: &str = "https://v-mware-as-a-service-api.cloud.ibm.com/v1";

/// Configuration for a service client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    /// Base URL every path template is resolved against
    #[validate(url)]
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to a custom CA certificate (PEM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether failed requests are retried
    #[serde(default)]
    pub enable_retries: bool,

    /// Maximum number of retries when retries are enabled
    #[validate(range(min = 0, max = 10))]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Cap on a single retry delay, in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_max_retry_interval_secs")]
    pub max_retry_interval_secs: u64,

    /// Whether request bodies are gzip-compressed
    #[serde(default)]
    pub enable_gzip: bool,

    /// Headers added to every request unless the call sets them itself
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_headers: BTreeMap<String, String>,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    60
}

const fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

const fn default_max_retry_interval_secs() -> u64 {
    DEFAULT_MAX_RETRY_INTERVAL_SECS
}

impl ServiceConfig {
    /// Create a configuration for the given service URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(service_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            service_url: service_url.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: std::path::PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Enable retries; zero values select the defaults.
    #[must_use]
    pub const fn with_retries(mut self, max_retries: u32, max_retry_interval_secs: u64) -> Self {
        self.enable_retries = true;
        self.max_retries = if max_retries == 0 {
            DEFAULT_MAX_RETRIES
        } else {
            max_retries
        };
        self.max_retry_interval_secs = if max_retry_interval_secs == 0 {
            DEFAULT_MAX_RETRY_INTERVAL_SECS
        } else {
            max_retry_interval_secs
        };
        self
    }

    /// Enable or disable request body compression.
    #[must_use]
    pub const fn with_gzip(mut self, enabled: bool) -> Self {
        self.enable_gzip = enabled;
        self
    }

    /// Add a default header.
    #[must_use]
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Retry policy described by this configuration.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        if self.enable_retries {
            RetryPolicy::new()
                .with_max_retries(self.max_retries)
                .with_max_delay(Duration::from_secs(self.max_retry_interval_secs))
        } else {
            RetryPolicy::no_retry()
        }
    }

    /// Parse and validate the service URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_service_url(&self) -> Result<Url, Error> {
        Url::parse(&self.service_url)
            .map_err(|e| Error::ConfigError(format!("Invalid service URL: {e}")))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
            enable_retries: false,
            max_retries: default_max_retries(),
            max_retry_interval_secs: default_max_retry_interval_secs(),
            enable_gzip: false,
            default_headers: BTreeMap::new(),
        }
    }
}
