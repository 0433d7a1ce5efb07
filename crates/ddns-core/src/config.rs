//! Configuration types for the DDNS updater
//!
//! Everything here is built once at startup and passed by reference into the
//! provider. Nothing reads the environment after that.

use std::fmt;
use std::time::Duration;

/// Environment variable holding the Porkbun API key
pub const API_KEY_VAR: &str = "PORKBUN_API_KEY";

/// Environment variable holding the Porkbun secret API key
pub const SECRET_KEY_VAR: &str = "PORKBUN_SECRET_KEY";

/// Optional override for the API host
pub const API_URL_VAR: &str = "PORKBUN_API_URL";

/// Set to `dry-run` to read records without writing them
pub const MODE_VAR: &str = "DDNS_MODE";

/// Porkbun API host
pub const DEFAULT_API_BASE: &str = "https://api.porkbun.com";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// TTL written with every record update, in seconds
pub const RECORD_TTL_SECS: u32 = 600;

/// Porkbun API credentials
///
/// The Debug implementation never exposes either key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<REDACTED>")
            .field("secret_api_key", &"<REDACTED>")
            .finish()
    }
}

impl Credentials {
    /// Build credentials from explicit values
    ///
    /// Empty values count as missing.
    pub fn new(
        api_key: impl Into<String>,
        secret_api_key: impl Into<String>,
    ) -> Result<Self, crate::Error> {
        let api_key = api_key.into();
        let secret_api_key = secret_api_key.into();

        if api_key.is_empty() || secret_api_key.is_empty() {
            return Err(missing_credentials());
        }

        Ok(Self {
            api_key,
            secret_api_key,
        })
    }

    /// Load credentials from the process environment
    pub fn from_env() -> Result<Self, crate::Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        match (lookup(API_KEY_VAR), lookup(SECRET_KEY_VAR)) {
            (Some(api_key), Some(secret_api_key)) => Self::new(api_key, secret_api_key),
            _ => Err(missing_credentials()),
        }
    }

    /// The API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The secret API key
    /// ⚠️ NEVER log this value
    pub fn secret_api_key(&self) -> &str {
        &self.secret_api_key
    }
}

fn missing_credentials() -> crate::Error {
    crate::Error::config(format!(
        "Missing at least one environment variable: {API_KEY_VAR} {SECRET_KEY_VAR}"
    ))
}

/// Porkbun provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API credentials
    pub credentials: Credentials,

    /// API host, without a trailing slash
    pub api_base: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Dry-run mode: perform reads but only log the intended write
    pub dry_run: bool,
}

impl ProviderConfig {
    /// Create a configuration pointing at the public Porkbun API
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            dry_run: false,
        }
    }

    /// Point the provider at a different API host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, crate::Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from credentials plus the optional host and mode variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;
        let dry_run = lookup(MODE_VAR)
            .unwrap_or_default()
            .eq_ignore_ascii_case("dry-run");
        let config = Self::new(credentials).with_dry_run(dry_run);

        Ok(match lookup(API_URL_VAR).filter(|url| !url.is_empty()) {
            Some(url) => config.with_api_base(url),
            None => config,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.api_base.starts_with("https://") && !self.api_base.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "{API_URL_VAR} must use HTTP or HTTPS scheme. Got: {}",
                self.api_base
            )));
        }
        if self.timeout.is_zero() {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }
        Ok(())
    }
}
