//! Process-wide configuration for the pet store load test.
//!
//! Configuration is read once from the environment when the load test starts and is
//! immutable afterward. A `.env` file in the working directory, or any parent, is loaded
//! first with [`load_env_file`]; variables already set in the environment win. The result is
//! shared read-only by every [`GooseUser`](goose::goose::GooseUser) through an
//! [`Arc`](std::sync::Arc).
//!
//! The following environment variables are recognized:
//!  - `BASE_URL`: the pet store API to load test, defaults to [`DEFAULT_BASE_URL`]. This
//!    becomes the Goose default host, so it can still be overridden with `--host`.
//!  - `ENABLE_LOGGING`: set to `true` (any case) to log full request details when a
//!    request fails; any other value disables them. Enabled when unset.
//!  - `API_KEY`: sent in the `api_key` header of every request, defaults to
//!    [`DEFAULT_API_KEY`].

use goose::GooseError;
use reqwest::header::HeaderValue;
use std::{
    env, fmt,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

/// The public demo deployment of the pet store API.
pub const DEFAULT_BASE_URL: &str = "https://petstore3.swagger.io/api/v3";
/// Placeholder API key accepted by the demo deployment.
pub const DEFAULT_API_KEY: &str = "12345";
/// How long a single request may take before it is treated as failed.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

const BASE_URL: &str = "BASE_URL";
const ENABLE_LOGGING: &str = "ENABLE_LOGGING";
const API_KEY: &str = "API_KEY";

/// Configuration shared by all users of the load test.
#[derive(Debug, Clone)]
pub struct PetstoreConfig {
    /// The pet store API, including any base path such as `/api/v3`.
    pub base_url: Url,
    /// Value of the `api_key` header.
    pub api_key: String,
    /// Log request URL, headers and payload when a request fails.
    pub enable_logging: bool,
    /// Upper bound on every request.
    pub timeout: Duration,
}

impl Default for PetstoreConfig {
    fn default() -> Self {
        PetstoreConfig {
            // The default is a constant known to parse.
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            api_key: DEFAULT_API_KEY.to_string(),
            enable_logging: true,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl PetstoreConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults for
    /// anything the lookup doesn't provide.
    ///
    /// # Example
    /// ```rust
    /// use petstore_goose::config::PetstoreConfig;
    ///
    /// let config = PetstoreConfig::from_lookup(|key| match key {
    ///     "API_KEY" => Some("secret".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.api_key, "secret");
    /// assert!(config.enable_logging);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PetstoreConfig::default();

        if let Some(base_url) = lookup(BASE_URL) {
            config.base_url = parse_base_url(&base_url)?;
        }

        if let Some(enable_logging) = lookup(ENABLE_LOGGING) {
            config.enable_logging = enable_logging.trim().eq_ignore_ascii_case("true");
        }

        if let Some(api_key) = lookup(API_KEY) {
            if HeaderValue::from_str(&api_key).is_err() {
                return Err(ConfigError::InvalidApiKey {
                    detail: "API_KEY must only contain visible ASCII characters".to_string(),
                });
            }
            config.api_key = api_key;
        }

        debug!(
            "configuration: base_url={} enable_logging={} timeout={:?}",
            config.base_url, config.enable_logging, config.timeout
        );

        Ok(config)
    }
}

/// Load a `.env` file into the process environment, if one can be found.
///
/// Returns the path of the loaded file. A missing file is not an error, an unreadable
/// or malformed one is logged and otherwise ignored.
pub fn load_env_file() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!("loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) => {
            report_env_file_error(&e);
            None
        }
    }
}

/// Load the given file into the process environment, see [`load_env_file`].
pub fn load_env_file_from(path: &Path) -> Option<PathBuf> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            info!("loaded environment from {}", path.display());
            Some(path.to_path_buf())
        }
        Err(e) => {
            report_env_file_error(&e);
            None
        }
    }
}

fn report_env_file_error(e: &dotenvy::Error) {
    if e.not_found() {
        debug!("no .env file found");
    } else {
        warn!("failed to load .env file: {}", e);
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let base_url = Url::parse(value).map_err(|parse_error| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        detail: format!("BASE_URL must be an absolute URL: {}", parse_error),
        parse_error: Some(parse_error),
    })?;

    if base_url.cannot_be_a_base() || base_url.host().is_none() {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            detail: "BASE_URL must include a scheme and a host".to_string(),
            parse_error: None,
        });
    }

    Ok(base_url)
}

/// An enumeration of all errors raised while reading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// `BASE_URL` is not a usable absolute URL.
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// An explanation of the error.
        detail: String,
        /// Wraps a [`url::ParseError`](https://docs.rs/url/*/url/enum.ParseError.html), if
        /// the value failed to parse at all.
        parse_error: Option<url::ParseError>,
    },
    /// `API_KEY` can't be sent as an HTTP header value.
    InvalidApiKey {
        /// An explanation of the error.
        detail: String,
    },
}
impl ConfigError {
    fn describe(&self) -> &str {
        match *self {
            ConfigError::InvalidBaseUrl { .. } => "invalid BASE_URL",
            ConfigError::InvalidApiKey { .. } => "invalid API_KEY",
        }
    }

    fn option(&self) -> &str {
        match *self {
            ConfigError::InvalidBaseUrl { .. } => BASE_URL,
            ConfigError::InvalidApiKey { .. } => API_KEY,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidBaseUrl { ref detail, .. }
            | ConfigError::InvalidApiKey { ref detail } => {
                write!(f, "ConfigError: {} ({})", self.describe(), detail)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            ConfigError::InvalidBaseUrl {
                parse_error: Some(ref parse_error),
                ..
            } => Some(parse_error),
            _ => None,
        }
    }
}

/// Surface configuration errors the same way Goose reports invalid options.
impl From<ConfigError> for GooseError {
    fn from(err: ConfigError) -> GooseError {
        let value = match err {
            ConfigError::InvalidBaseUrl { ref value, .. } => value.clone(),
            // Don't echo secrets back.
            ConfigError::InvalidApiKey { .. } => String::new(),
        };
        GooseError::InvalidOption {
            option: err.option().to_string(),
            value,
            detail: err.to_string(),
        }
    }
}
