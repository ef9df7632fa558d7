//! HTTP client for the platform API.
//!
//! All operations go through [`ApiClient`]: a thin wrapper over a shared
//! pooled [`reqwest::Client`] that adds token authentication, a SHA-256
//! `Content-Digest` header, the SDK version header, and transparent retry
//! of transient failures.

use std::{sync::LazyLock, time::Duration};

use base64::Engine;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    api::retry::{RetryPolicy, retry_with_backoff},
    config::{AccountConfig, ApiToken},
    error::{Result, SdkError},
};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per `ApiClient`,
/// preserving connection pooling benefits across all instances.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("failed to create default HTTP client")
});

/// Computes a `Content-Digest` header value (RFC 9530 format).
///
/// # Examples
///
/// ```
/// use recotag::api::compute_content_digest;
///
/// let digest = compute_content_digest(b"payload");
/// assert!(digest.starts_with("sha-256=:"));
/// assert!(digest.ends_with(':'));
/// ```
#[must_use]
pub fn compute_content_digest(body: &[u8]) -> String {
    let hash = Sha256::digest(body);
    let hash_b64 = base64::engine::general_purpose::STANDARD.encode(hash);
    format!("sha-256=:{hash_b64}:")
}

/// Rejects request paths with traversal sequences or a missing leading slash.
fn sanitize_path(path: &str) -> Result<&str> {
    if path.contains("..") || path.contains("//") {
        return Err(SdkError::InvalidApiUrl(
            "invalid path: traversal sequences not allowed".to_owned(),
        ));
    }
    if !path.starts_with('/') {
        return Err(SdkError::InvalidApiUrl("path must start with '/'".to_owned()));
    }
    Ok(path)
}

/// Client for platform API operations.
///
/// Holds the validated [`AccountConfig`] and a [`RetryPolicy`]. Cheap to
/// clone; all clones share the underlying connection pool.
///
/// # Examples
///
/// ```
/// use recotag::{api::ApiClient, config::AccountConfig};
///
/// let config = AccountConfig::from_toml_str(
///     r#"
///     account_id = "shop-eu-1"
///
///     [tokens]
///     api = "tok_live_abc123"
///     "#,
/// )?;
/// let client = ApiClient::new(config)?;
/// assert_eq!(client.config().account_id, "shop-eu-1");
/// # Ok::<(), recotag::error::SdkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: AccountConfig,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Creates a client for the given account.
    ///
    /// # Errors
    ///
    /// Returns the validation error when the configuration is invalid.
    pub fn new(config: AccountConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: DEFAULT_HTTP_CLIENT.clone(),
            config,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The account configuration this client operates for.
    #[must_use]
    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    /// The API operations token, required by most operations.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ConfigError`] when no API token is configured.
    pub fn api_token(&self) -> Result<&ApiToken> {
        self.config
            .tokens
            .api
            .as_ref()
            .ok_or_else(|| SdkError::ConfigError("operation requires an api token".to_owned()))
    }

    /// The SSO token.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ConfigError`] when no SSO token is configured.
    pub fn sso_token(&self) -> Result<&ApiToken> {
        self.config
            .tokens
            .sso
            .as_ref()
            .ok_or_else(|| SdkError::ConfigError("operation requires an sso token".to_owned()))
    }

    /// POSTs a JSON document and deserializes the response body.
    ///
    /// # Errors
    ///
    /// Returns transport errors, [`SdkError::ApiError`] for non-success
    /// statuses, and [`SdkError::ApiError`] when the response body does
    /// not match `T`.
    pub(crate) async fn post_json<T>(&self, path: &str, token: &ApiToken, body: String) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let bytes = self.execute(path, token, "application/json", body.into_bytes()).await?;
        serde_json::from_slice(&bytes).map_err(|e| SdkError::ApiError {
            status: 200,
            message: format!("response did not match the API contract: {e}"),
        })
    }

    /// POSTs a JSON document, discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns transport errors and [`SdkError::ApiError`] for non-success
    /// statuses.
    pub(crate) async fn post_json_accepted(
        &self,
        path: &str,
        token: &ApiToken,
        body: String,
    ) -> Result<()> {
        self.execute(path, token, "application/json", body.into_bytes()).await?;
        Ok(())
    }

    /// POSTs a raw binary body (encrypted history envelopes).
    ///
    /// # Errors
    ///
    /// Returns transport errors and [`SdkError::ApiError`] for non-success
    /// statuses.
    pub(crate) async fn post_octets(
        &self,
        path: &str,
        token: &ApiToken,
        body: Vec<u8>,
    ) -> Result<()> {
        self.execute(path, token, "application/octet-stream", body).await?;
        Ok(())
    }

    /// Executes one POST with auth, digest, and version headers, retrying
    /// transient failures per the configured policy.
    #[instrument(skip(self, token, body), fields(account_id = %self.config.account_id, path, body_len = body.len()))]
    async fn execute(
        &self,
        path: &str,
        token: &ApiToken,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let path = sanitize_path(path)?;
        let url = format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path);
        let digest = compute_content_digest(&body);

        // One correlation id per logical request, kept across retries so
        // the platform can collapse duplicate deliveries.
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, url = %url, "issuing platform request");

        retry_with_backoff(&self.retry, || {
            let body = body.clone();
            let url = url.as_str();
            let digest = digest.as_str();
            async move {
                let response = self
                    .client
                    .post(url)
                    .header("Authorization", format!("Bearer {}", token.reveal()))
                    .header("Content-Type", content_type)
                    .header("Content-Digest", digest)
                    .header("X-SDK-Version", crate::VERSION)
                    .header("X-Request-ID", request_id.to_string())
                    .body(body)
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    let message = response.text().await.unwrap_or_default();
                    return Err(SdkError::ApiError { status: status.as_u16(), message });
                }

                Ok(response.bytes().await?.to_vec())
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_api_token() -> AccountConfig {
        let mut config = AccountConfig::new("shop-eu-1");
        config.tokens.api = Some(ApiToken::new("tok_live_abc123"));
        config
    }

    #[test]
    fn test_content_digest_format() {
        let digest = compute_content_digest(b"test body");
        assert!(digest.starts_with("sha-256=:"));
        assert!(digest.ends_with(':'));
    }

    #[test]
    fn test_content_digest_is_deterministic() {
        assert_eq!(compute_content_digest(b"x"), compute_content_digest(b"x"));
        assert_ne!(compute_content_digest(b"x"), compute_content_digest(b"y"));
    }

    #[test]
    fn test_sanitize_path() {
        assert!(sanitize_path("/v1/products/upsert").is_ok());
        assert!(sanitize_path("v1/products").is_err());
        assert!(sanitize_path("/v1/../secrets").is_err());
        assert!(sanitize_path("/v1//products").is_err());
    }

    #[test]
    fn test_new_validates_config() {
        let mut config = config_with_api_token();
        config.api_base_url = "http://api.recotag.com".to_owned();
        assert!(ApiClient::new(config).is_err());
    }

    #[test]
    fn test_token_accessors() {
        let client = ApiClient::new(config_with_api_token()).unwrap();
        assert!(client.api_token().is_ok());
        assert!(matches!(client.sso_token(), Err(SdkError::ConfigError(_))));
    }
}
