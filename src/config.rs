//! Client configuration parsed from environment variables.

use url::Url;

use crate::login;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_AUTH_URL: &str = "https://auth.emergentagent.com/";
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an absolute http(s) URL, got `{value}`")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash.
    pub api_url: String,
    /// Hosted identity-provider login page.
    pub auth_url: String,
    /// Public URL of the web app, without trailing slash.
    pub app_url: String,
    pub timeouts: HttpTimeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            auth_url: DEFAULT_AUTH_URL.to_owned(),
            app_url: DEFAULT_APP_URL.to_owned(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `QUICKTHUMB_API_URL`: default `http://127.0.0.1:8001`
    /// - `QUICKTHUMB_AUTH_URL`: default `https://auth.emergentagent.com/`
    /// - `QUICKTHUMB_APP_URL`: default `http://localhost:3000`
    /// - `QUICKTHUMB_REQUEST_TIMEOUT_SECS`: default 120
    /// - `QUICKTHUMB_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if a URL variable is not absolute http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if a URL variable is not absolute http(s).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = url_var(&lookup, "QUICKTHUMB_API_URL", DEFAULT_API_URL)?;
        let auth_url = url_var(&lookup, "QUICKTHUMB_AUTH_URL", DEFAULT_AUTH_URL)?;
        let app_url = url_var(&lookup, "QUICKTHUMB_APP_URL", DEFAULT_APP_URL)?;
        let timeouts = HttpTimeouts {
            request_secs: parse_u64(&lookup, "QUICKTHUMB_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(&lookup, "QUICKTHUMB_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            auth_url,
            app_url: app_url.trim_end_matches('/').to_owned(),
            timeouts,
        })
    }

    /// Callback target handed to the identity provider.
    #[must_use]
    pub fn callback_url(&self) -> String {
        login::callback_url(&self.app_url)
    }

    /// Full login URL for the configured provider and callback.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `auth_url` is not absolute.
    pub fn login_url(&self) -> Result<Url, url::ParseError> {
        login::login_url(&self.auth_url, &self.callback_url())
    }
}

fn url_var<F>(lookup: &F, var: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned());
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value),
        _ => Err(ConfigError::InvalidUrl { var, value }),
    }
}

fn parse_u64<F>(lookup: &F, var: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
