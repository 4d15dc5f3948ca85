use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::error::{DssError, Result};

/// User name the dSS ships with.
pub const DEFAULT_USER: &str = "dssadmin";

/// Connection parameters handed to [`crate::DssClient::connect`].
///
/// The base URL is mandatory. Authentication uses the application token when
/// one is set, otherwise the password (with [`DEFAULT_USER`] unless a user is
/// given).
///
/// ```
/// use dssapi::ConnectionConfig;
///
/// let config = ConnectionConfig::new("https://dss.local:8080")
///     .with_app_token("8c1b...")
///     .accept_invalid_certs(true);
/// ```
#[derive(Clone, Default)]
pub struct ConnectionConfig {
    url: String,
    app_token: Option<String>,
    password: Option<String>,
    user: Option<String>,
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
}

pub(crate) enum Credentials<'a> {
    ApplicationToken(&'a str),
    Password { user: &'a str, password: &'a str },
}

impl ConnectionConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_app_token(mut self, app_token: impl Into<String>) -> Self {
        self.app_token = Some(app_token.into());
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// A dSS gateway usually serves a self-signed certificate, which fails
    /// verification. Only turn this on for servers on a network you trust,
    /// anything between client and server can then read the session token.
    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Timeout for every request. Requests wait indefinitely by default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn app_token(&self) -> Option<&str> {
        self.app_token.as_deref()
    }

    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(DEFAULT_USER)
    }

    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Parses the base URL. Fails with [`DssError::InvalidConfiguration`] for an
    /// empty or malformed URL.
    pub(crate) fn base_url(&self) -> Result<Url> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(DssError::InvalidConfiguration(
                "please provide a valid url".to_string(),
            ));
        }
        let url = Url::parse(raw)
            .map_err(|err| DssError::InvalidConfiguration(format!("{raw:?}: {err}")))?;
        if matches!(url.scheme(), "http" | "https") && url.has_host() {
            return Ok(url);
        }
        Err(DssError::InvalidConfiguration(format!(
            "{raw:?}: expected an http(s) url with a host"
        )))
    }

    /// The application token wins when both token and password are set.
    pub(crate) fn credentials(&self) -> Result<Credentials<'_>> {
        fn non_empty(val: &Option<String>) -> Option<&str> {
            val.as_deref().filter(|val| !val.is_empty())
        }

        if let Some(app_token) = non_empty(&self.app_token) {
            return Ok(Credentials::ApplicationToken(app_token));
        }
        match non_empty(&self.password) {
            Some(password) => Ok(Credentials::Password {
                user: self.user(),
                password,
            }),
            None => Err(DssError::MissingCredentials),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hidden = |val: &Option<String>| val.as_ref().map(|_| "***");
        f.debug_struct("ConnectionConfig")
            .field("url", &self.url)
            .field("app_token", &hidden(&self.app_token))
            .field("password", &hidden(&self.password))
            .field("user", &self.user())
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_invalid() {
        for url in ["", "   "] {
            let config = ConnectionConfig::new(url).with_app_token("token");
            assert!(matches!(
                config.base_url(),
                Err(DssError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn url_needs_http_scheme_and_host() {
        assert!(ConnectionConfig::new("dss.local").base_url().is_err());
        assert!(ConnectionConfig::new("ftp://dss.local").base_url().is_err());
        let url = ConnectionConfig::new("https://dss.local:8080").base_url().unwrap();
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn app_token_takes_precedence() {
        let config = ConnectionConfig::new("https://dss.local")
            .with_password("secret")
            .with_app_token("app");
        assert!(matches!(
            config.credentials(),
            Ok(Credentials::ApplicationToken("app"))
        ));
    }

    #[test]
    fn password_login_defaults_to_dssadmin() {
        let config = ConnectionConfig::new("https://dss.local").with_password("secret");
        match config.credentials() {
            Ok(Credentials::Password { user, password }) => {
                assert_eq!(user, "dssadmin");
                assert_eq!(password, "secret");
            }
            _ => panic!("expected password credentials"),
        }
    }

    #[test]
    fn empty_app_token_falls_back_to_password() {
        let config = ConnectionConfig::new("https://dss.local")
            .with_app_token("")
            .with_password("secret")
            .with_user("installer");
        match config.credentials() {
            Ok(Credentials::Password { user, password }) => {
                assert_eq!(user, "installer");
                assert_eq!(password, "secret");
            }
            _ => panic!("expected password credentials"),
        }
    }

    #[test]
    fn empty_credentials_are_missing() {
        let config = ConnectionConfig::new("https://dss.local")
            .with_app_token("")
            .with_password("");
        assert!(matches!(
            config.credentials(),
            Err(DssError::MissingCredentials)
        ));
    }

    #[test]
    fn debug_hides_secrets() {
        let config = ConnectionConfig::new("https://dss.local")
            .with_password("hunter2")
            .with_app_token("0123abcd");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("0123abcd"));
    }
}
