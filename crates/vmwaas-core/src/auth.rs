//! Authenticator contract and the simple credential schemes.
//!
//! The dispatcher calls [`Authenticator::authenticate`] on every attempt, so
//! implementations that refresh tokens can do their own I/O there. Token
//! exchange against an identity service lives outside this crate and plugs in
//! through the same trait.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Authentication type reported by [`NoAuthAuthenticator`].
pub const AUTHTYPE_NOAUTH: &str = "noAuth";
/// Authentication type reported by [`BearerTokenAuthenticator`].
pub const AUTHTYPE_BEARER_TOKEN: &str = "bearerToken";
/// Authentication type reported by [`BasicAuthenticator`].
pub const AUTHTYPE_BASIC: &str = "basic";

/// Attaches credentials to outbound requests.
///
/// Implementations must be safe to share between concurrent calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Add credentials to `request`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthError`] when no credentials can be produced.
    /// The dispatcher does not retry after this error.
    async fn authenticate(&self, request: &mut reqwest::Request) -> Result<()>;

    /// Name of the authentication scheme.
    fn authentication_type(&self) -> &'static str;

    /// Check the configuration without doing any I/O.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the authenticator is unusable.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Sends requests without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

impl NoAuthAuthenticator {
    /// Create the authenticator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Authenticator for NoAuthAuthenticator {
    async fn authenticate(&self, _request: &mut reqwest::Request) -> Result<()> {
        Ok(())
    }

    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_NOAUTH
    }
}

/// Sends a caller-managed bearer token.
#[derive(Debug)]
pub struct BearerTokenAuthenticator {
    token: SecretString,
}

impl BearerTokenAuthenticator {
    /// Create the authenticator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let authenticator = Self {
            token: SecretString::from(token.into()),
        };
        authenticator.validate()?;
        Ok(authenticator)
    }

    /// Replace the token, e.g. after the caller refreshed it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the token is empty.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = SecretString::from(token.into());
        if token.expose_secret().is_empty() {
            return Err(Error::ConfigError("bearer token must not be empty".to_string()));
        }
        self.token = token;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Authenticator for BearerTokenAuthenticator {
    async fn authenticate(&self, request: &mut reqwest::Request) -> Result<()> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|_| Error::AuthError("bearer token is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }

    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_BEARER_TOKEN
    }

    fn validate(&self) -> Result<()> {
        if self.token.expose_secret().is_empty() {
            return Err(Error::ConfigError("bearer token must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Sends HTTP basic credentials.
#[derive(Debug)]
pub struct BasicAuthenticator {
    username: String,
    password: SecretString,
}

impl BasicAuthenticator {
    /// Create the authenticator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if either part is empty or the username
    /// contains a colon.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let authenticator = Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        };
        authenticator.validate()?;
        Ok(authenticator)
    }

    /// The configured username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[async_trait::async_trait]
impl Authenticator for BasicAuthenticator {
    async fn authenticate(&self, request: &mut reqwest::Request) -> Result<()> {
        let credentials = format!("{}:{}", self.username, self.password.expose_secret());
        let mut value = HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(credentials.as_bytes())))
            .map_err(|_| Error::AuthError("basic credentials are not a valid header value".to_string()))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }

    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_BASIC
    }

    fn validate(&self) -> Result<()> {
        if self.username.is_empty() || self.password.expose_secret().is_empty() {
            return Err(Error::ConfigError(
                "basic authentication needs a username and a password".to_string(),
            ));
        }
        if self.username.contains(':') {
            return Err(Error::ConfigError(
                "basic authentication username must not contain ':'".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn request() -> reqwest::Request {
        reqwest::Request::new(Method::GET, "http://localhost/vdcs".parse().unwrap())
    }

    #[tokio::test]
    async fn noauth_leaves_request_untouched() {
        let mut req = request();
        NoAuthAuthenticator::new().authenticate(&mut req).await.unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
        assert_eq!(NoAuthAuthenticator.authentication_type(), AUTHTYPE_NOAUTH);
    }

    #[tokio::test]
    async fn bearer_sets_authorization() {
        let mut req = request();
        let auth = BearerTokenAuthenticator::new("abc123").unwrap();
        auth.authenticate(&mut req).await.unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer abc123");
        assert!(req.headers()[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn bearer_rejects_empty_token() {
        assert!(matches!(
            BearerTokenAuthenticator::new(""),
            Err(Error::ConfigError(_))
        ));
        let mut auth = BearerTokenAuthenticator::new("a").unwrap();
        assert!(auth.set_token("").is_err());
        assert!(auth.set_token("b").is_ok());
    }

    #[test]
    fn bearer_debug_hides_token() {
        let auth = BearerTokenAuthenticator::new("super-secret").unwrap();
        assert!(!format!("{auth:?}").contains("super-secret"));
    }

    #[tokio::test]
    async fn basic_sets_authorization() {
        let mut req = request();
        let auth = BasicAuthenticator::new("Aladdin", "open sesame").unwrap();
        auth.authenticate(&mut req).await.unwrap();
        assert_eq!(
            req.headers()[AUTHORIZATION],
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }

    #[test]
    fn basic_validates_parts() {
        assert!(BasicAuthenticator::new("", "pw").is_err());
        assert!(BasicAuthenticator::new("user", "").is_err());
        assert!(BasicAuthenticator::new("us:er", "pw").is_err());
        assert_eq!(BasicAuthenticator::new("user", "pw").unwrap().username(), "user");
    }

    #[tokio::test]
    async fn mock_authenticator_can_fail() {
        let mut mock = MockAuthenticator::new();
        mock.expect_authenticate()
            .times(1)
            .returning(|_| Err(Error::AuthError("token expired".to_string())));

        let mut req = request();
        let err = mock.authenticate(&mut req).await.unwrap_err();
        assert!(matches!(err, Error::AuthError(_)));
    }
}
