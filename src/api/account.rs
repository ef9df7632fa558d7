//! Account lifecycle operations: platform sign-up and single sign-on.

use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    api::client::ApiClient,
    error::{Result, SdkError},
    serialize::{TagField, TagValue, Taggable, json},
};

/// Parameters for creating a platform account.
#[derive(Debug, Clone)]
pub struct SignupParams {
    /// Merchant shop display name.
    pub shop_name: String,
    /// E-commerce platform identifier (e.g. `magento`, `shopify`).
    pub platform: String,
    /// Email of the account owner.
    pub owner_email: String,
    /// ISO 639-1 language code for the shop front page.
    pub language_code: String,
    /// ISO 4217 currency code of the shop, when known.
    pub currency_code: Option<String>,
    /// Shop front page URL, when known.
    pub front_page_url: Option<String>,
}

impl Taggable for SignupParams {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![
            TagField::new("shopName", Some(TagValue::from(self.shop_name.as_str()))),
            TagField::new("platform", Some(TagValue::from(self.platform.as_str()))),
            TagField::new("ownerEmail", Some(TagValue::from(self.owner_email.as_str()))),
            TagField::new("currencyCode", self.currency_code.as_deref().map(TagValue::from)),
            TagField::new("frontPageUrl", self.front_page_url.as_deref().map(TagValue::from)),
        ]
    }
}

/// Tokens and identity returned by a successful sign-up.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    /// Newly issued account identifier.
    pub account_id: String,
    /// Token for API operations.
    pub api_token: String,
    /// Token for SSO link generation.
    pub sso_token: String,
    /// Base64 shared secret for history exports, when the platform
    /// enables them for the account.
    #[serde(default)]
    pub export_secret: Option<String>,
}

/// Creates a new platform account.
///
/// The language code lands in the request path and must be a two-letter
/// lowercase ISO 639-1 code.
///
/// # Errors
///
/// Returns [`SdkError::ConfigError`] without an API token, validation
/// errors for a malformed language code, and transport/API errors.
#[instrument(skip(client, params), fields(platform = %params.platform, language = %params.language_code))]
pub async fn create_account(client: &ApiClient, params: SignupParams) -> Result<SignupResponse> {
    // The language code lands in the request path; reject anything that
    // is not a plain two-letter code before building the URL.
    if params.language_code.len() != 2
        || !params.language_code.chars().all(|c| c.is_ascii_lowercase())
    {
        return Err(SdkError::InvalidApiUrl(format!(
            "language path segment must be two lowercase letters: {}",
            params.language_code
        )));
    }

    info!("creating platform account");
    let token = client.api_token()?;
    let body = json::serialize(&params)?;
    let path = format!("/v1/accounts/create/{}", params.language_code);

    client.post_json(&path, token, body).await
}

/// Parameters for generating a single sign-on link.
#[derive(Debug, Clone)]
pub struct SsoParams {
    /// Email of the merchant user logging in.
    pub email: String,
    /// Given name shown in the platform UI.
    pub first_name: Option<String>,
    /// Family name shown in the platform UI.
    pub last_name: Option<String>,
}

impl Taggable for SsoParams {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![
            TagField::new("email", Some(TagValue::from(self.email.as_str()))),
            TagField::new("firstName", self.first_name.as_deref().map(TagValue::from)),
            TagField::new("lastName", self.last_name.as_deref().map(TagValue::from)),
        ]
    }
}

/// SSO login link returned by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct SsoResponse {
    /// Short-lived URL logging the merchant user into the platform UI.
    pub login_url: String,
}

/// Generates a single sign-on link for a merchant user.
///
/// # Errors
///
/// Returns [`SdkError::ConfigError`] without an SSO token, plus
/// transport/API errors.
#[instrument(skip(client, params), fields(account_id = %client.config().account_id))]
pub async fn sso_login(client: &ApiClient, params: SsoParams) -> Result<SsoResponse> {
    info!("requesting sso login link");
    let token = client.sso_token()?;
    let body = json::serialize(&params)?;
    let path = format!("/v1/sso/{}", client.config().account_id);

    client.post_json(&path, token, body).await
}
