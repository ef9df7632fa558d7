//! Platform account configuration.
//!
//! TOML-deserializable settings for one platform account: the account id,
//! the API base URL, and the issued tokens. Merchant platforms typically
//! ship this as part of their own plugin configuration.
//!
//! ```toml
//! account_id = "shop-eu-1"
//! api_base_url = "https://api.recotag.com"
//!
//! [tokens]
//! api = "tok_live_abc123"
//! sso = "tok_sso_def456"
//! export_secret = "c2hhcmVkLXNlY3JldC10b2tlbg=="
//! ```

use std::fmt;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{Result, SdkError};

/// Default platform API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.recotag.com";

/// An issued API token.
///
/// Wraps the secret so it never leaks through `Debug` output or tracing
/// fields: formatting shows only a short fingerprint.
///
/// # Examples
///
/// ```
/// use recotag::config::ApiToken;
///
/// let token = ApiToken::new("tok_live_abc123");
/// let shown = format!("{token:?}");
/// assert!(!shown.contains("abc123"));
/// assert!(shown.contains(&token.fingerprint()));
/// ```
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token value.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructor convenience"
    )]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building request authentication.
    #[must_use]
    pub fn reveal(&self) -> &str {
        &self.0
    }

    /// Short non-reversible fingerprint for logs and diagnostics.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(&Sha256::digest(self.0.as_bytes()).as_slice()[..4])
    }

    /// True when the wrapped value is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({})", self.fingerprint())
    }
}

/// Tokens issued for one account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenConfig {
    /// Token authorizing API operations (upsert, recrawl, confirmation).
    pub api: Option<ApiToken>,
    /// Token authorizing single sign-on link generation.
    pub sso: Option<ApiToken>,
    /// Base64-encoded shared secret for encrypted history exports.
    /// Absent secret means history export is skipped, not an error.
    pub export_secret: Option<String>,
}

/// Root account configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    /// Platform-issued account identifier.
    pub account_id: String,

    /// Base URL for the platform API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Issued tokens.
    #[serde(default)]
    pub tokens: TokenConfig,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

impl AccountConfig {
    /// Creates a configuration with the default API base URL and no tokens.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructor convenience"
    )]
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_base_url: default_api_base_url(),
            tokens: TokenConfig::default(),
        }
    }

    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ConfigError`] for malformed TOML and any error
    /// [`validate`](Self::validate) produces.
    ///
    /// # Examples
    ///
    /// ```
    /// use recotag::config::AccountConfig;
    ///
    /// let config = AccountConfig::from_toml_str(
    ///     r#"
    ///     account_id = "shop-eu-1"
    ///
    ///     [tokens]
    ///     api = "tok_live_abc123"
    ///     "#,
    /// )?;
    /// assert_eq!(config.account_id, "shop-eu-1");
    /// # Ok::<(), recotag::error::SdkError>(())
    /// ```
    pub fn from_toml_str(document: &str) -> Result<Self> {
        let config: Self = toml::from_str(document)
            .map_err(|e| SdkError::ConfigError(format!("malformed TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks the account id shape, requires an HTTPS non-loopback API
    /// base URL, and rejects empty token values.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidAccountId`] or [`SdkError::ConfigError`]
    /// naming the offending setting.
    pub fn validate(&self) -> Result<()> {
        validate_account_id(&self.account_id)?;
        self.validate_base_url()?;

        if self.tokens.api.as_ref().is_some_and(ApiToken::is_empty) {
            return Err(SdkError::ConfigError("api token must not be empty".to_owned()));
        }
        if self.tokens.sso.as_ref().is_some_and(ApiToken::is_empty) {
            return Err(SdkError::ConfigError("sso token must not be empty".to_owned()));
        }

        Ok(())
    }

    fn validate_base_url(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            SdkError::ConfigError(format!("invalid api_base_url '{}': {e}", self.api_base_url))
        })?;

        if url.scheme() != "https" {
            return Err(SdkError::ConfigError(format!(
                "api_base_url must use HTTPS, got: {}",
                url.scheme()
            )));
        }

        if let Some(host) = url.host_str() {
            let host = host.to_lowercase();
            if host == "localhost" || host == "::1" || host == "[::1]" || host.starts_with("127.") {
                return Err(SdkError::ConfigError(format!(
                    "api_base_url must not be localhost or loopback: {host}"
                )));
            }
        }

        Ok(())
    }
}

/// Validates a platform account identifier.
///
/// Account ids are lowercase alphanumeric with hyphens, 1-64 characters.
///
/// # Errors
///
/// Returns [`SdkError::InvalidAccountId`] describing the violation.
pub fn validate_account_id(account_id: &str) -> Result<()> {
    if account_id.is_empty() {
        return Err(SdkError::InvalidAccountId("account id must not be empty".to_owned()));
    }
    if account_id.len() > 64 {
        return Err(SdkError::InvalidAccountId(format!(
            "account id exceeds 64 characters: {} characters",
            account_id.len()
        )));
    }
    if !account_id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(SdkError::InvalidAccountId(format!(
            "account id must be lowercase alphanumeric with hyphens: {account_id}"
        )));
    }
    Ok(())
}
